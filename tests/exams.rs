mod common;

use actix_web::{http::StatusCode, test as actix_test};
use common::{
    body_string, create_course, create_user, location, login_request, seed_cs101,
    session_cookie, setup, test_app,
};
use online_course::errors::OnlineCourseError;
use online_course::models::exams::requests::{CreateChoiceRequest, CreateQuestionRequest};
use online_course::services::enrollments::enroll;
use online_course::services::exams::{get_result, submit_exam};

fn choice_fields(ids: &[i64]) -> Vec<(String, String)> {
    ids.iter()
        .map(|id| (format!("choice_{id}"), id.to_string()))
        .collect()
}

#[actix_web::test]
async fn cs101_scores_follow_selected_choices() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();
    let cs101 = seed_cs101(storage).await;
    let user = create_user(storage, "hana", "pw").await;
    enroll(storage, Some(&user), cs101.course.id).await.unwrap();

    let cases = [
        (vec![cs101.c1], 10),
        (vec![cs101.c2], 0),
        (vec![cs101.c1, cs101.c2], 10),
        (vec![], 0),
    ];

    for (selected, expected) in cases {
        let submission_id = submit_exam(
            storage,
            Some(&user),
            cs101.course.id,
            &choice_fields(&selected),
        )
        .await
        .unwrap();

        let result = get_result(storage, cs101.course.id, submission_id)
            .await
            .unwrap();
        assert_eq!(result.total_score, expected, "selected {selected:?}");
        assert_eq!(result.possible_score, 10);
        assert_eq!(result.choices.len(), selected.len());
        assert_eq!(result.passed, expected == 10);
        assert_eq!(result.questions.len(), 1);
    }
}

#[actix_web::test]
async fn duplicate_choice_ids_are_recorded_once() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();
    let cs101 = seed_cs101(storage).await;
    let user = create_user(storage, "ivan", "pw").await;
    enroll(storage, Some(&user), cs101.course.id).await.unwrap();

    let fields = vec![
        ("choice_a".to_string(), cs101.c1.to_string()),
        ("choice_b".to_string(), cs101.c1.to_string()),
    ];
    let submission_id = submit_exam(storage, Some(&user), cs101.course.id, &fields)
        .await
        .unwrap();

    let result = get_result(storage, cs101.course.id, submission_id)
        .await
        .unwrap();
    assert_eq!(result.choices.len(), 1);
    assert_eq!(result.total_score, 10);
}

#[actix_web::test]
async fn submit_requires_enrollment() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();
    let cs101 = seed_cs101(storage).await;
    let user = create_user(storage, "judy", "pw").await;

    let err = submit_exam(storage, Some(&user), cs101.course.id, &choice_fields(&[cs101.c1]))
        .await
        .unwrap_err();
    assert!(matches!(err, OnlineCourseError::NotEnrolled(_)));

    let err = submit_exam(storage, None, cs101.course.id, &choice_fields(&[cs101.c1]))
        .await
        .unwrap_err();
    assert!(matches!(err, OnlineCourseError::NotEnrolled(_)));

    let err = submit_exam(storage, Some(&user), 4040, &[]).await.unwrap_err();
    assert!(matches!(err, OnlineCourseError::NotFound(_)));
}

#[actix_web::test]
async fn malformed_or_foreign_choices_are_rejected() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();
    let cs101 = seed_cs101(storage).await;
    let other = create_course(storage, "Other").await;
    let foreign = storage
        .create_question(CreateQuestionRequest {
            course_id: other.id,
            question_text: "Unrelated?".to_string(),
            grade: 5,
            choices: vec![CreateChoiceRequest {
                choice_text: "Yes".to_string(),
                is_correct: true,
            }],
        })
        .await
        .unwrap();
    let user = create_user(storage, "karl", "pw").await;
    enroll(storage, Some(&user), cs101.course.id).await.unwrap();

    let fields = vec![("choice_1".to_string(), "abc".to_string())];
    let err = submit_exam(storage, Some(&user), cs101.course.id, &fields)
        .await
        .unwrap_err();
    assert!(matches!(err, OnlineCourseError::MalformedInput(_)));

    let err = submit_exam(
        storage,
        Some(&user),
        cs101.course.id,
        &choice_fields(&[foreign.choices[0].id]),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, OnlineCourseError::MalformedInput(_)));
}

#[actix_web::test]
async fn missing_or_mismatched_submission_is_not_found() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();
    let cs101 = seed_cs101(storage).await;
    let other = create_course(storage, "Other").await;
    let user = create_user(storage, "lena", "pw").await;
    enroll(storage, Some(&user), cs101.course.id).await.unwrap();

    let err = get_result(storage, cs101.course.id, 777).await.unwrap_err();
    assert!(matches!(err, OnlineCourseError::NotFound(_)));

    let submission_id = submit_exam(
        storage,
        Some(&user),
        cs101.course.id,
        &choice_fields(&[cs101.c1]),
    )
    .await
    .unwrap();

    let err = get_result(storage, other.id, submission_id).await.unwrap_err();
    assert!(matches!(err, OnlineCourseError::NotFound(_)));

    let err = get_result(storage, 9999, submission_id).await.unwrap_err();
    assert!(matches!(err, OnlineCourseError::NotFound(_)));
}

#[actix_web::test]
async fn exam_pages_flow() {
    let ctx = setup().await;
    let storage = ctx.storage.as_ref();
    let cs101 = seed_cs101(storage).await;
    create_user(storage, "mia", "pw").await;
    let app = actix_test::init_service(test_app(&ctx)).await;
    let submit_uri = format!("/onlinecourse/{}/submit/", cs101.course.id);
    let c1 = cs101.c1.to_string();
    let c1_field = format!("choice_{}", cs101.c1);

    let resp = actix_test::call_service(&app, login_request("mia", "pw").to_request()).await;
    let cookie = session_cookie(&resp).unwrap();

    // 未选课
    let req = actix_test::TestRequest::post()
        .uri(&submit_uri)
        .cookie(cookie.clone())
        .set_form([(c1_field.as_str(), c1.as_str())])
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = actix_test::TestRequest::post()
        .uri(&format!("/onlinecourse/{}/enroll/", cs101.course.id))
        .cookie(cookie.clone())
        .to_request();
    actix_test::call_service(&app, req).await;

    // 非整数选项
    let req = actix_test::TestRequest::post()
        .uri(&submit_uri)
        .cookie(cookie.clone())
        .set_form([("choice_1", "abc")])
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = actix_test::TestRequest::post()
        .uri(&submit_uri)
        .cookie(cookie.clone())
        .set_form([(c1_field.as_str(), c1.as_str())])
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let result_uri = location(&resp).expect("redirect to result");
    assert!(result_uri.starts_with(&format!(
        "/onlinecourse/course/{}/submission/",
        cs101.course.id
    )));
    assert!(result_uri.ends_with("/result/"));

    let req = actix_test::TestRequest::get().uri(&result_uri).to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("Congratulations"));
    assert!(body.contains("10 / 10"));

    let req = actix_test::TestRequest::get()
        .uri(&format!(
            "/onlinecourse/course/{}/submission/424242/result/",
            cs101.course.id
        ))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
