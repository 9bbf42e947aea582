/// Text rendered by the `skills` built-in unless configuration overrides it.
pub const SKILLS_TEXT: &str = "
= Technical Skills =

== Programming Languages ==
• JavaScript / TypeScript
• Python
• Go
• Java

== AI / Machine Learning ==
• TensorFlow / PyTorch
• Natural Language Processing
• Computer Vision
• Reinforcement Learning
• LLM Prompt Engineering

== Web Development ==
• React / Next.js
• Node.js / Express
• REST API Design
• GraphQL
• MongoDB / PostgreSQL

== DevOps ==
• Docker / Kubernetes
• CI/CD Pipelines
• AWS / GCP / Azure
• Linux System Administration
";
