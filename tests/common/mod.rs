#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    App,
    cookie::Cookie,
    dev::ServiceResponse,
    test as actix_test,
};
use online_course::cache::{ObjectCache, object_cache::moka::MokaCacheWrapper};
use online_course::middlewares::SessionUser;
use online_course::models::courses::entities::Course;
use online_course::models::courses::requests::{CreateCourseRequest, CreateLessonRequest};
use online_course::models::exams::entities::ExamQuestion;
use online_course::models::exams::requests::{CreateChoiceRequest, CreateQuestionRequest};
use online_course::models::users::{entities::User, requests::RegistrationForm};
use online_course::runtime::lifetime::startup::StartupContext;
use online_course::services::auth::register_user;
use online_course::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use tempfile::TempDir;

pub struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub startup: StartupContext,
    _dir: TempDir,
}

/// 每个测试独占一个临时 SQLite 数据库
pub async fn setup() -> TestContext {
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
    let storage: Arc<dyn Storage> = Arc::new(
        SeaOrmStorage::new_with_url(&url)
            .await
            .expect("open test database"),
    );
    let cache: Arc<dyn ObjectCache> =
        Arc::new(MokaCacheWrapper::new(100, 60).expect("create test cache"));
    let startup = StartupContext::new(storage.clone(), cache).expect("load templates");

    TestContext {
        storage,
        startup,
        _dir: dir,
    }
}

pub fn test_app(
    ctx: &TestContext,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let startup = ctx.startup.clone();
    App::new()
        .wrap(SessionUser)
        .configure(move |cfg| startup.configure_app(cfg))
}

pub async fn create_user(storage: &dyn Storage, username: &str, password: &str) -> User {
    register_user(
        storage,
        &RegistrationForm {
            username: username.to_string(),
            psw: password.to_string(),
            firstname: "Test".to_string(),
            lastname: "User".to_string(),
        },
    )
    .await
    .expect("register test user")
}

pub async fn create_course(storage: &dyn Storage, name: &str) -> Course {
    storage
        .create_course(CreateCourseRequest {
            name: name.to_string(),
            description: format!("{name} description"),
            image_url: None,
            pub_date: None,
        })
        .await
        .expect("create course")
}

/// CS101：一道 10 分的题目，C1 正确，C2 错误
pub struct Cs101 {
    pub course: Course,
    pub question: ExamQuestion,
    pub c1: i64,
    pub c2: i64,
}

pub async fn seed_cs101(storage: &dyn Storage) -> Cs101 {
    let course = create_course(storage, "CS101").await;
    storage
        .create_lesson(CreateLessonRequest {
            course_id: course.id,
            title: "Bits and bytes".to_string(),
            order: 1,
            content: "Everything is a bit.".to_string(),
        })
        .await
        .expect("create lesson");

    let question = storage
        .create_question(CreateQuestionRequest {
            course_id: course.id,
            question_text: "What does CPU stand for?".to_string(),
            grade: 10,
            choices: vec![
                CreateChoiceRequest {
                    choice_text: "Central Processing Unit".to_string(),
                    is_correct: true,
                },
                CreateChoiceRequest {
                    choice_text: "Computer Personal Unit".to_string(),
                    is_correct: false,
                },
            ],
        })
        .await
        .expect("create question");

    let c1 = question.choices[0].id;
    let c2 = question.choices[1].id;
    Cs101 {
        course,
        question,
        c1,
        c2,
    }
}

pub fn session_cookie(resp: &ServiceResponse) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "session")
        .map(|c| c.into_owned())
}

pub fn location(resp: &ServiceResponse) -> Option<String> {
    resp.headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn login_request(username: &str, password: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/onlinecourse/login")
        .set_form([("username", username), ("psw", password)])
}

pub async fn body_string(resp: ServiceResponse) -> String {
    let bytes = actix_test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
