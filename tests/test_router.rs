use vigil::http::request::{Method, Request, RequestBuilder};
use vigil::http::response::{Response, StatusCode};
use vigil::router::Router;

fn get(path: &str) -> Request {
    RequestBuilder::new()
        .method(Method::GET)
        .path(path)
        .build()
        .unwrap()
}

#[test]
fn test_registered_path_invokes_its_handler() {
    let mut router = Router::new();
    router.register("/known", |_req| Ok(Response::ok("known body")));

    let response = router.lookup("/known")(&get("/known")).unwrap();

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"known body".to_vec());
}

#[test]
fn test_each_path_gets_its_own_handler() {
    let mut router = Router::new();
    router.register("/a", |_req| Ok(Response::ok("a")));
    router.register("/b", |_req| Ok(Response::ok("b")));

    let a = router.lookup("/a")(&get("/a")).unwrap();
    let b = router.lookup("/b")(&get("/b")).unwrap();

    assert_eq!(a.body, b"a".to_vec());
    assert_eq!(b.body, b"b".to_vec());
}

#[test]
fn test_unregistered_path_falls_back_to_not_found() {
    let mut router = Router::new();
    router.register("/known", |_req| Ok(Response::ok("known")));

    let response = router.lookup("/missing")(&get("/missing")).unwrap();

    assert_eq!(response.status, StatusCode::NotFound);
}

#[test]
fn test_lookup_is_exact_match_only() {
    let mut router = Router::new();
    router.register("/known", |_req| Ok(Response::ok("known")));

    // No prefix or wildcard matching
    let prefix = router.lookup("/known/sub")(&get("/known/sub")).unwrap();
    assert_eq!(prefix.status, StatusCode::NotFound);

    let partial = router.lookup("/kno")(&get("/kno")).unwrap();
    assert_eq!(partial.status, StatusCode::NotFound);
}

#[test]
fn test_later_registration_replaces_earlier() {
    let mut router = Router::new();
    router.register("/dup", |_req| Ok(Response::ok("first")));
    router.register("/dup", |_req| Ok(Response::ok("second")));

    let response = router.lookup("/dup")(&get("/dup")).unwrap();
    assert_eq!(response.body, b"second".to_vec());
}

#[test]
fn test_custom_not_found_handler() {
    let mut router = Router::new();
    router.set_not_found(|_req| Ok(Response::ok("custom fallback")));

    let response = router.lookup("/anything")(&get("/anything")).unwrap();
    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, b"custom fallback".to_vec());
}

#[test]
fn test_handler_can_capture_state() {
    let greeting = String::from("hello from capture");
    let mut router = Router::new();
    router.register("/greet", move |_req| Ok(Response::ok(greeting.clone())));

    let response = router.lookup("/greet")(&get("/greet")).unwrap();
    assert_eq!(response.body, b"hello from capture".to_vec());
}

#[test]
fn test_handler_sees_the_request() {
    let mut router = Router::new();
    router.register("/echo", |req: &Request| Ok(Response::ok(req.body.clone())));

    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/echo")
        .body(b"payload".to_vec())
        .build()
        .unwrap();

    let response = router.lookup("/echo")(&req).unwrap();
    assert_eq!(response.body, b"payload".to_vec());
}
