//! Drives the CLI commands against a live item server.

use std::cell::RefCell;

use item_cli::{render, run, Command, CommandError, UreqTransport, View};
use item_core::collection::{DELETE_MESSAGE, VALIDATION_MESSAGE};
use item_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, ItemClient, ItemCollection, ItemId, Operation,
    Transport,
};

/// Records every request and answers none of them.
#[derive(Default)]
struct Refusing {
    sent: RefCell<Vec<(HttpMethod, String)>>,
}

impl Transport for Refusing {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.sent.borrow_mut().push((request.method, request.path));
        Err(ApiError::Transport("connection refused".to_string()))
    }
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            item_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn collection(base: &str) -> ItemCollection {
    ItemCollection::new(ItemClient::new(base))
}

#[test]
fn add_list_show_delete() {
    let base = start_server();
    let transport = UreqTransport::default();

    let add = Command::Add {
        title: "Walk dog".to_string(),
        description: "after lunch".to_string(),
    };
    let mut items = collection(&base);
    assert_eq!(run(&add, &mut items, &transport).unwrap(), View::Collection);
    assert_eq!(items.state().items().len(), 1);
    let id = items.state().items()[0].id;

    // A fresh process sees the stored item.
    let mut items = collection(&base);
    run(&Command::Status, &mut items, &transport).unwrap();
    assert_eq!(
        render::collection(items.state()),
        format!("backend: healthy\n#{id:<4} Walk dog\n      after lunch\n")
    );

    let mut items = collection(&base);
    match run(&Command::Show { id }, &mut items, &transport).unwrap() {
        View::Item(item) => assert_eq!(item.title, "Walk dog"),
        other => panic!("expected item view, got {other:?}"),
    }

    let mut items = collection(&base);
    run(&Command::Delete { id }, &mut items, &transport).unwrap();
    assert!(items.state().items().is_empty());

    let mut items = collection(&base);
    run(&Command::List, &mut items, &transport).unwrap();
    assert_eq!(render::collection(items.state()), "(no items)\n");
}

#[test]
fn blank_add_reports_validation_message() {
    let base = start_server();
    let transport = UreqTransport::default();
    let mut items = collection(&base);

    let add = Command::Add {
        title: "   ".to_string(),
        description: "x".to_string(),
    };
    let err = run(&add, &mut items, &transport).unwrap_err();

    assert!(matches!(err, CommandError::Collection(_)));
    assert_eq!(
        items.state().last_error(),
        Some("Please fill in both title and description")
    );
}

#[test]
fn show_missing_item_is_a_lookup_error() {
    let base = start_server();
    let transport = UreqTransport::default();
    let mut items = collection(&base);

    let err = run(&Command::Show { id: ItemId(404) }, &mut items, &transport).unwrap_err();

    assert!(matches!(
        err,
        CommandError::Lookup {
            source: ApiError::NotFound,
            ..
        }
    ));
}

// ---------------------------------------------------------------------------
// Backend down
// ---------------------------------------------------------------------------

#[test]
fn blank_add_sends_nothing() {
    let transport = Refusing::default();
    let mut items = collection("http://x");

    let add = Command::Add {
        title: " ".to_string(),
        description: "x".to_string(),
    };
    let err = run(&add, &mut items, &transport).unwrap_err();

    assert!(matches!(err, CommandError::Collection(_)));
    assert!(transport.sent.borrow().is_empty());
    assert_eq!(items.state().last_error(), Some(VALIDATION_MESSAGE));
}

#[test]
fn delete_is_sent_even_when_backend_is_down() {
    let transport = Refusing::default();
    let mut items = collection("http://x");

    let err = run(&Command::Delete { id: ItemId(3) }, &mut items, &transport).unwrap_err();

    assert!(matches!(
        err,
        CommandError::Collection(item_core::CollectionError::Failed {
            operation: Operation::Delete(ItemId(3)),
            ..
        })
    ));
    assert_eq!(
        *transport.sent.borrow(),
        vec![(HttpMethod::Delete, "http://x/api/items/3".to_string())]
    );
    assert_eq!(items.state().last_error(), Some(DELETE_MESSAGE));
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

#[test]
fn transport_forwards_request_headers() {
    let base = start_server();
    let client = ItemClient::new(&base);
    let input = item_core::NewItem::from_draft("T", "D").unwrap();
    let mut request = client.build_create_item(&input).unwrap();

    // The server only accepts JSON bodies announced by content-type.
    let response = UreqTransport::default().execute(request.clone()).unwrap();
    assert_eq!(response.status, 200);

    request.headers.clear();
    let response = UreqTransport::default().execute(request).unwrap();
    assert_eq!(response.status, 415);
}

#[test]
fn transport_returns_response_headers() {
    let base = start_server();
    let client = ItemClient::new(&base);

    let response = UreqTransport::default()
        .execute(client.build_health())
        .unwrap();

    assert!(response
        .headers
        .iter()
        .any(|(name, value)| name == "content-type" && value == "application/json"));
}
