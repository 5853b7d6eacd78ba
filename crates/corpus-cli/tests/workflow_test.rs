//! End-to-end flow against a mocked corpus API: login, guard, dashboard, upload.

use corpus_api_client::{ApiClient, SessionManager};
use corpus_cli::{
    land, LoginForm, LoginOutcome, ProfileState, Route, SubmitOutcome, UploadWorkflow, View,
};
use corpus_core::DEFAULT_CATEGORY_ID;
use mockito::Matcher;

#[tokio::test]
async fn test_login_then_upload_story() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/v1/auth/login")
        .with_status(200)
        .with_body(r#"{"access_token":"session-token","token_type":"bearer"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/v1/auth/me")
        .match_header("authorization", "Bearer session-token")
        .with_status(200)
        .with_body(r#"{"id":"user-42","name":"Ravi","phone":"9000000000","email":"ravi@example.org"}"#)
        .create_async()
        .await;
    let upload = server
        .mock("POST", "/api/v1/records/upload")
        .match_header("authorization", "Bearer session-token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("title".into(), "Story".into()),
            Matcher::UrlEncoded("user_id".into(), "user-42".into()),
            Matcher::UrlEncoded("language".into(), "hindi".into()),
            Matcher::UrlEncoded("media_type".into(), "text".into()),
            Matcher::UrlEncoded("total_chunks".into(), "1".into()),
        ]))
        .with_status(201)
        .with_body(r#"{"id":"record-1"}"#)
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let client = ApiClient::new(server.url(), None).unwrap();

    // Before login the dashboard is out of reach.
    let mut sessions = SessionManager::open(&session_file).unwrap();
    assert_eq!(land(&Route::Dashboard, sessions.current()), View::Login);

    let mut form = LoginForm::new("9000000000", "pw");
    let outcome = form.submit(&client, &mut sessions).await;
    assert_eq!(outcome, LoginOutcome::Navigate(Route::Dashboard));

    // A fresh process restores the session from disk.
    let sessions = SessionManager::open(&session_file).unwrap();
    assert_eq!(land(&Route::Dashboard, sessions.current()), View::Dashboard);
    let session = sessions.current().unwrap().clone();

    let mut workflow = UploadWorkflow::new(DEFAULT_CATEGORY_ID);
    assert!(matches!(
        workflow.mount(&client, &session).await,
        ProfileState::Loaded(_)
    ));
    assert_eq!(workflow.summary_lines()[0], "Welcome, Ravi!");
    assert_eq!(workflow.summary_lines()[2], "Email: ravi@example.org");

    workflow.edit(|d| {
        d.set_title("Story");
        d.set_description("Once upon a time");
        d.set_language("Hindi");
    });
    let outcome = workflow.submit(&client, &session).await;

    match outcome {
        SubmitOutcome::Uploaded(body) => assert_eq!(body["id"], "record-1"),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(workflow.draft().category_id(), DEFAULT_CATEGORY_ID);
    upload.assert_async().await;
}

#[tokio::test]
async fn test_rejected_login_leaves_no_session() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/v1/auth/login")
        .with_status(400)
        .with_body(r#"{"message":"Incorrect password"}"#)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let client = ApiClient::new(server.url(), None).unwrap();
    let mut sessions = SessionManager::open(&session_file).unwrap();

    let mut form = LoginForm::new("9000000000", "bad");
    assert_eq!(form.submit(&client, &mut sessions).await, LoginOutcome::Stay);
    assert_eq!(form.error(), Some("Incorrect password"));
    assert!(!session_file.exists());
    assert_eq!(land(&Route::Dashboard, sessions.current()), View::Login);
}
