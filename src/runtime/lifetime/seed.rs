//! 演示课程数据
//!
//! 仅在课程表为空时写入，已有数据的数据库不受影响。

use tracing::debug;

use crate::errors::Result;
use crate::models::courses::requests::{CreateCourseRequest, CreateLessonRequest};
use crate::models::exams::requests::{CreateChoiceRequest, CreateQuestionRequest};
use crate::storage::Storage;

struct DemoQuestion {
    text: &'static str,
    grade: i32,
    choices: &'static [(&'static str, bool)],
}

struct DemoCourse {
    name: &'static str,
    description: &'static str,
    lessons: &'static [(&'static str, &'static str)],
    questions: &'static [DemoQuestion],
}

const DEMO_COURSES: &[DemoCourse] = &[
    DemoCourse {
        name: "CS101: Introduction to Computer Science",
        description: "How computers represent data, run programs and talk to each other.",
        lessons: &[
            (
                "Bits and bytes",
                "Everything a computer stores is ultimately a sequence of bits.",
            ),
            (
                "The processor",
                "The CPU fetches, decodes and executes instructions one after another.",
            ),
        ],
        questions: &[
            DemoQuestion {
                text: "What does CPU stand for?",
                grade: 10,
                choices: &[
                    ("Central Processing Unit", true),
                    ("Computer Personal Unit", false),
                ],
            },
            DemoQuestion {
                text: "How many bits are in a byte?",
                grade: 5,
                choices: &[("8", true), ("16", false), ("4", false)],
            },
        ],
    },
    DemoCourse {
        name: "Databases for Beginners",
        description: "Tables, keys and queries: the relational model from the ground up.",
        lessons: &[
            (
                "Tables and rows",
                "A table holds rows that share the same set of columns.",
            ),
            (
                "Keys",
                "A primary key identifies a row; a foreign key points at another table.",
            ),
        ],
        questions: &[DemoQuestion {
            text: "Which key uniquely identifies a row in a table?",
            grade: 10,
            choices: &[
                ("Primary key", true),
                ("Foreign key", false),
                ("Index key", false),
            ],
        }],
    },
    DemoCourse {
        name: "Web Development Basics",
        description: "Requests, responses and the HTML that travels between them.",
        lessons: &[(
            "HTTP",
            "A browser sends a request and the server answers with a status code and a body.",
        )],
        questions: &[DemoQuestion {
            text: "Which status code means the resource was not found?",
            grade: 10,
            choices: &[("404", true), ("200", false), ("500", false)],
        }],
    },
];

/// 写入演示课程，返回新建的课程数量
pub async fn seed_demo_catalogue(storage: &dyn Storage) -> Result<usize> {
    if storage.count_courses().await? > 0 {
        return Ok(0);
    }

    for demo in DEMO_COURSES {
        let course = storage
            .create_course(CreateCourseRequest {
                name: demo.name.to_string(),
                description: demo.description.to_string(),
                image_url: None,
                pub_date: Some(chrono::Utc::now()),
            })
            .await?;

        for (order, (title, content)) in demo.lessons.iter().enumerate() {
            storage
                .create_lesson(CreateLessonRequest {
                    course_id: course.id,
                    title: title.to_string(),
                    order: order as i32 + 1,
                    content: content.to_string(),
                })
                .await?;
        }

        for question in demo.questions {
            storage
                .create_question(CreateQuestionRequest {
                    course_id: course.id,
                    question_text: question.text.to_string(),
                    grade: question.grade,
                    choices: question
                        .choices
                        .iter()
                        .map(|(text, is_correct)| CreateChoiceRequest {
                            choice_text: text.to_string(),
                            is_correct: *is_correct,
                        })
                        .collect(),
                })
                .await?;
        }

        debug!("Seeded demo course {} (ID: {})", course.name, course.id);
    }

    Ok(DEMO_COURSES.len())
}
