//! Built-in courses used to seed an empty catalog.

use crate::model::{Course, Level, Media, Module, QuizQuestion};

fn options(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The default catalog.
pub fn default_courses() -> Vec<Course> {
    vec![
        Course {
            id: "course-html-basics".to_string(),
            title: "HTML & Semantic Markup".to_string(),
            summary: "Learn the basics of HTML markup and build accessible pages.".to_string(),
            level: Level::Beginner,
            modules: vec![
                Module {
                    id: "html-intro".to_string(),
                    title: "Introduction to HTML".to_string(),
                    content: "<p>HTML (HyperText Markup Language) is the foundation of web pages. \
                              Learn tags like &lt;h1&gt;, &lt;p&gt;, &lt;a&gt;, and semantic elements.</p>"
                        .to_string(),
                    media: Some(Media::default()),
                    quiz: vec![QuizQuestion::new(
                        "Which tag defines a paragraph?",
                        options(&["<p>", "<div>", "<span>", "<section>"]),
                        0,
                    )],
                },
                Module {
                    id: "html-forms".to_string(),
                    title: "Forms & Inputs".to_string(),
                    content: "<p>Forms collect user input. We'll cover inputs, labels, and \
                              accessibility basics.</p>"
                        .to_string(),
                    media: None,
                    quiz: vec![QuizQuestion::new(
                        "Which attribute links a label to an input?",
                        options(&["for", "id", "name", "type"]),
                        0,
                    )],
                },
            ],
        },
        Course {
            id: "course-js-practical".to_string(),
            title: "Practical JavaScript".to_string(),
            summary: "Small practical exercises to learn DOM, events, and state.".to_string(),
            level: Level::Intermediate,
            modules: vec![Module {
                id: "js-dom".to_string(),
                title: "DOM Manipulation".to_string(),
                content: "<p>Interact with the page using the Document Object Model (DOM).</p>"
                    .to_string(),
                media: None,
                quiz: vec![QuizQuestion::new(
                    "Which method selects an element by CSS selector?",
                    options(&[
                        "getElementById()",
                        "querySelector()",
                        "getElementsByClassName()",
                        "createElement()",
                    ]),
                    1,
                )],
            }],
        },
    ]
}
