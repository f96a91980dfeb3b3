//! Drive the product screen against the live mock server over ureq.

use product_app::{view, ProductApi, ProductPage, UreqTransport};
use product_core::{ApiError, ClientConfig, Transport};

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

fn page(config: ClientConfig) -> ProductPage<UreqTransport> {
    ProductPage::new(ProductApi::new(config, UreqTransport::new()))
}

#[test]
fn add_edit_delete_through_the_page() {
    let base = spawn_server(Some("tok"));
    let mut page = page(ClientConfig::new(&base, "shop-1").with_token("tok"));

    page.load();
    assert!(page.error().is_none());
    assert!(view::render(&page).contains(view::EMPTY_MESSAGE));

    page.form_mut().name = "Pen".to_string();
    page.form_mut().price = "1.5".to_string();
    assert!(page.submit(), "create failed: {:?}", page.error());
    assert_eq!(page.products().len(), 1);

    let pen = page.products()[0].clone();
    page.start_edit(&pen);
    page.form_mut().price = "2.25".to_string();
    assert!(page.submit(), "update failed: {:?}", page.error());
    assert_eq!(page.products().len(), 1);
    assert_eq!(page.products()[0].id, pen.id);
    assert_eq!(page.products()[0].price, 2.25);

    assert!(page.delete(&pen.id, |label| label == "Pen"));
    assert!(page.products().is_empty());
    assert!(page.error().is_none());
}

#[test]
fn missing_token_surfaces_reason_phrase() {
    let base = spawn_server(Some("tok"));
    let mut page = page(ClientConfig::new(&base, "shop-1"));

    page.load();
    assert_eq!(page.error(), Some("API Error: Unauthorized"));
    assert!(!page.is_loading());
}

#[test]
fn unreachable_backend_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = UreqTransport::new();
    let client = product_core::ProductClient::new(ClientConfig::new(&format!("http://{addr}"), "i"));
    let err = transport.execute(client.build_list()).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn caller_supplied_id_survives_backend_id_assignment() {
    let base = spawn_server(None);
    let api = ProductApi::new(ClientConfig::new(&base, "shop-2"), UreqTransport::new());

    let created = api
        .create(&serde_json::json!({"id": "sku-5", "name": "Pen", "price": 1.5}))
        .unwrap();
    assert_eq!(created.id, product_core::ProductId::from("sku-5"));

    let products = api.list().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Pen");
}

#[test]
fn truncated_body_is_a_transport_error() {
    use std::io::{Read, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = [0u8; 4096];
        let _ = stream.read(&mut request);
        let _ = stream.write_all(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n[{\"id\":1",
        );
    });

    let transport = UreqTransport::new();
    let client = product_core::ProductClient::new(ClientConfig::new(&format!("http://{addr}"), "i"));
    let err = transport.execute(client.build_list()).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
