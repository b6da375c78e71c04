use compra_facil::app::{execute_line, Outcome};
use compra_facil::domain::ports::SessionStorage;
use compra_facil::{
    AppError, InvoiceLookupClient, ListState, MemorySessionStorage, SessionPersistence,
    ShoppingListEngine,
};
use httpmock::prelude::*;
use std::time::Duration;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

fn ones() -> String {
    "1".repeat(44)
}

/// 模擬 SEFAZ 回應頁面：前三個區塊是表頭，第四個是商品明細
fn sefaz_page(products: &[&str]) -> String {
    let header = |title: &str| {
        format!(
            r#"<table class="NFCCabecalho" width="100%"><tr><td class="NFCCabecalho_SubTitulo">{}</td></tr></table>"#,
            title
        )
    };

    let mut items = String::from(
        r#"<table class="NFCCabecalho" width="100%"><tr><td>Código</td><td>Descrição</td><td>Qtde</td><td>Un</td><td>Vl Unit</td><td>Vl Total</td></tr>"#,
    );
    for (index, product) in products.iter().enumerate() {
        items.push_str(&format!(
            r#"<tr id="Item + {n}"><td class="NFCDetalhe_Item">{n}</td><td class="NFCDetalhe_Item">  {product}  </td><td>1,000</td><td>UN</td><td>5,99</td><td>5,99</td></tr>"#,
            n = index + 1,
            product = product
        ));
    }
    items.push_str("</table>");

    format!(
        r#"<html><head><title>SEFAZ-RS</title></head><body><div id="respostaWS">{}{}{}{}{}</div></body></html>"#,
        header("SUPERMERCADO EXEMPLO LTDA"),
        header("Dados da NFC-e"),
        header("Consumidor não identificado"),
        items,
        header("Valor total R$ 17,97")
    )
}

fn engine_for(
    server: &MockServer,
    storage: &MemorySessionStorage,
) -> ShoppingListEngine<InvoiceLookupClient, MemorySessionStorage> {
    let client =
        InvoiceLookupClient::new(server.url("/sat-proxy"), Duration::from_secs(5)).unwrap();
    ShoppingListEngine::new(client, SessionPersistence::new(storage.clone()))
}

#[tokio::test]
async fn test_lookup_scenario_sorts_case_sensitively() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/sat-proxy")
            .header("content-type", FORM_CONTENT_TYPE)
            .body(format!("HML=false&chaveNFe={}", ones()));
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(sefaz_page(&["Arroz", "arroz", "Feijão"]));
    });

    let storage = MemorySessionStorage::new();
    let engine = engine_for(&server, &storage);

    let list = engine.lookup(&ones()).await.unwrap();

    api_mock.assert();
    let names: Vec<&str> = list.names().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["Arroz", "Feijão", "arroz"]);
    assert_eq!(
        storage.get_item("products").unwrap().as_deref(),
        Some(r#"["Arroz","Feijão","arroz"]"#)
    );
}

#[tokio::test]
async fn test_error_status_with_invoice_page_still_parses() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/sat-proxy");
        then.status(503).body(sefaz_page(&["Café"]));
    });

    let storage = MemorySessionStorage::new();
    let engine = engine_for(&server, &storage);

    let list = engine.lookup(&ones()).await.unwrap();

    api_mock.assert();
    assert!(list.contains("Café"));
}

#[tokio::test]
async fn test_not_found_page_is_empty_result_and_keeps_snapshot() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/sat-proxy");
        then.status(200)
            .body("<html><body><div id=\"respostaWS\"><p>NFC-e não encontrada.</p></div></body></html>");
    });

    let storage = MemorySessionStorage::new();
    storage.set_item("products", r#"["Leite"]"#).unwrap();
    let engine = engine_for(&server, &storage);

    let result = engine.lookup(&ones()).await;

    assert!(matches!(result, Err(AppError::EmptyResultError { .. })));
    assert_eq!(storage.get_item("products").unwrap().as_deref(), Some(r#"["Leite"]"#));
}

#[tokio::test]
async fn test_network_failure_keeps_snapshot() {
    let storage = MemorySessionStorage::new();
    storage.set_item("products", r#"["Leite"]"#).unwrap();
    let client =
        InvoiceLookupClient::new("http://127.0.0.1:1/sat-proxy", Duration::from_secs(2)).unwrap();
    let engine = ShoppingListEngine::new(client, SessionPersistence::new(storage.clone()));

    let result = engine.lookup(&ones()).await;

    assert!(matches!(result, Err(AppError::NetworkError(_))));
    assert_eq!(storage.get_item("products").unwrap().as_deref(), Some(r#"["Leite"]"#));
    assert!(engine.state().await.is_loaded());
}

#[tokio::test]
async fn test_malformed_key_sends_no_request() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/sat-proxy");
        then.status(200).body(sefaz_page(&["Arroz"]));
    });

    let storage = MemorySessionStorage::new();
    let engine = engine_for(&server, &storage);

    let result = engine.lookup("4324 0512 3456").await;

    assert!(matches!(result, Err(AppError::MalformedKeyError { .. })));
    api_mock.assert_hits(0);
    assert_eq!(engine.state().await, ListState::AwaitingLookup);
    assert_eq!(storage.get_item("products").unwrap(), None);
}

#[tokio::test]
async fn test_interactive_commands_drive_the_list() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/sat-proxy");
        then.status(200).body(sefaz_page(&["Feijão", "Arroz", "Sal"]));
    });

    let storage = MemorySessionStorage::new();
    let engine = engine_for(&server, &storage);

    let Outcome::Continue(text) = execute_line(&engine, &format!("buscar {}", ones())).await else {
        panic!("lookup should not quit");
    };
    assert!(text.contains("3 produto(s)"));
    assert!(text.contains("[ ] Arroz"));

    let Outcome::Continue(text) = execute_line(&engine, "marcar Feijão").await else {
        panic!("toggle should not quit");
    };
    assert!(text.contains("[x] Feijão"));

    let Outcome::Continue(text) = execute_line(&engine, "remover Arroz").await else {
        panic!("remove should not quit");
    };
    assert!(!text.contains("Arroz"));
    assert!(text.contains("[x] Feijão"));
    assert_eq!(
        storage.get_item("products").unwrap().as_deref(),
        Some(r#"["Feijão","Sal"]"#)
    );

    let Outcome::Continue(text) = execute_line(&engine, "remover Arroz").await else {
        panic!("remove should not quit");
    };
    assert!(text.contains("não está na lista"));

    let Outcome::Continue(text) = execute_line(&engine, "buscar").await else {
        panic!("lookup should not quit");
    };
    assert!(text.contains("Por favor, insira a chave da nota fiscal."));

    let Outcome::Continue(text) = execute_line(&engine, "limpar").await else {
        panic!("clear should not quit");
    };
    assert!(text.contains("buscar <chave>"));
    assert_eq!(storage.get_item("products").unwrap(), None);

    assert_eq!(execute_line(&engine, "sair").await, Outcome::Quit);
}
