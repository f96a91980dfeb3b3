//! Full CRUD lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every core client
//! operation over real HTTP using ureq. Validates that the core's request
//! building and response parsing work end-to-end with the actual server.

use product_core::{
    ApiError, ClientConfig, HttpMethod, HttpRequest, HttpResponse, Operation, ProductClient, ProductId, ProductInput,
};
use serde_json::json;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let body = req.body.unwrap_or_default();
    let mut response = match req.method {
        HttpMethod::Get => with_headers(agent.get(&req.url), &req.headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(&req.url), &req.headers).call(),
        HttpMethod::Post => with_headers(agent.post(&req.url), &req.headers).send(body.as_bytes()),
        HttpMethod::Put => with_headers(agent.put(&req.url), &req.headers).send(body.as_bytes()),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Start the mock server on a random port and return its base URL.
fn spawn_server(token: Option<&str>) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();
    let token = token.map(str::to_string);

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, token).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn crud_lifecycle() {
    let base = spawn_server(None);
    let client = ProductClient::new(ClientConfig::new(&base, "it-instance"));

    // Step 1: list, should be empty.
    let products = client.parse_list(execute(client.build_list())).unwrap();
    assert!(products.is_empty(), "expected empty list");

    // Step 2: a foreign record shares the collection.
    let req = HttpRequest {
        method: HttpMethod::Post,
        url: client.url(Operation::Create, None),
        headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        body: Some(json!({"name": "Haircut", "price": 20, "pp": "service"}).to_string()),
    };
    assert_eq!(execute(req).status, 201);

    // Step 3: create a product.
    let input = ProductInput {
        name: "Pen".to_string(),
        price: 1.5,
    };
    let created = client.parse_create(execute(client.build_create(&input).unwrap())).unwrap();
    assert_eq!(created.name, "Pen");
    assert_eq!(created.kind, "product");
    let id = created.id.clone();
    assert!(matches!(id, ProductId::Text(_)));

    // Step 4: list, only our record survives the filter.
    let products = client.parse_list(execute(client.build_list())).unwrap();
    assert_eq!(products, vec![created]);

    // Step 5: full-replace update.
    let input = ProductInput {
        name: "Fountain pen".to_string(),
        price: 12.0,
    };
    let updated = client
        .parse_update(execute(client.build_update(&id, &input).unwrap()))
        .unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.name, "Fountain pen");
    assert_eq!(updated.price, 12.0);

    // Step 6: delete.
    let removed = client.parse_remove(execute(client.build_remove(&id).unwrap())).unwrap();
    assert!(removed);

    // Step 7: delete again, the backend reports Not Found.
    let err = client
        .parse_remove(execute(client.build_remove(&id).unwrap()))
        .unwrap_err();
    assert!(matches!(err, ApiError::RequestFailed { status: 404, .. }));
    assert_eq!(err.to_string(), "API Error: Not Found");

    // Step 8: list, empty again.
    let products = client.parse_list(execute(client.build_list())).unwrap();
    assert!(products.is_empty(), "expected empty list after delete");
}

#[test]
fn bearer_token_round_trip() {
    let base = spawn_server(Some("s3cret"));

    let anonymous = ProductClient::new(ClientConfig::new(&base, "i"));
    let err = anonymous.parse_list(execute(anonymous.build_list())).unwrap_err();
    assert_eq!(err.to_string(), "API Error: Unauthorized");

    let authorized = ProductClient::new(ClientConfig::new(&base, "i").with_token("s3cret"));
    let products = authorized.parse_list(execute(authorized.build_list())).unwrap();
    assert!(products.is_empty());
}
