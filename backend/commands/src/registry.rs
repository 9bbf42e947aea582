/// Default terminal command set, loaded by `folio seed` and the admin seed route.
use folio_core::{CommandCategory, CommandKind, NewCommand};

fn builtin(name: &str, description: &str, category: CommandCategory, order: i64) -> NewCommand {
    NewCommand::new(name, CommandKind::Dynamic)
        .describe(description)
        .in_category(category, order)
}

fn text(name: &str, description: &str, response: &str, category: CommandCategory, order: i64) -> NewCommand {
    NewCommand::new(name, CommandKind::Static)
        .describe(description)
        .respond(response)
        .in_category(category, order)
}

/// The stock commands: the built-ins plus a few static pages and aliases.
pub fn default_commands() -> Vec<NewCommand> {
    use CommandCategory::*;
    vec![
        builtin("help", "Displays available commands", System, 1),
        builtin("clear", "Clears the terminal screen", System, 2),
        text(
            "pwd",
            "Prints working directory",
            "/home/rey",
            System,
            3,
        ),
        text(
            "ls",
            "Lists items in the current directory",
            "about.txt projects.txt skills.txt contact.txt",
            System,
            4,
        ),
        NewCommand::new("ll", CommandKind::Alias)
            .describe("Alias for ls")
            .alias_of("ls")
            .in_category(System, 5),
        text(
            "about",
            "Displays information about Rey",
            "Hi, I'm Rey! An AI Engineer with expertise in machine learning, deep learning, and computer vision. I build intelligent systems that solve real-world problems.",
            About,
            1,
        ),
        builtin("skills", "Lists Rey's technical skills", About, 2),
        text(
            "contact",
            "Shows contact information",
            "You can reach me through the contact form on this website or via email at rey@example.com.",
            About,
            3,
        ),
        builtin("projects", "Shows Rey's projects: projects [ai|web|mobile|featured]", Project, 1),
        text("hello", "Says hello", "Hello! Type 'help' to see what I can do.", General, 1),
        NewCommand::new("hi", CommandKind::Alias)
            .describe("Alias for hello")
            .alias_of("hello")
            .in_category(General, 2),
    ]
}
