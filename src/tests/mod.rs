use std::time::Instant;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::card::ImagePool;
use crate::deck::{Deck, FrameBody, NO_RESULTS};
use crate::pagination::Control;
use crate::store::CheatStore;

const SAMPLE: &str = "Reward,Description,Code\nGem,Free gems,ABC123\nCoin,Free coins,XYZ789";

async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "{status_line}\r\nContent-Type: text/csv; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/pub?output=csv")
}

fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

fn deck_from(csv: &str) -> Deck {
    let mut deck = Deck::new(CheatStore::new(10), ImagePool::default());
    deck.load(crate::csv::parse_csv(csv).unwrap());
    deck
}

#[tokio::test]
async fn fetches_and_parses_published_sheet() {
    let url = serve_once("HTTP/1.1 200 OK", SAMPLE).await;
    let text = crate::runner::fetch_csv(&direct_client(), &url).await.unwrap();
    let records = crate::csv::parse_csv(&text).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].code(), "XYZ789");
}

#[tokio::test]
async fn error_status_is_a_load_failure() {
    let url = serve_once("HTTP/1.1 404 Not Found", "gone").await;
    let err = crate::runner::fetch_csv(&direct_client(), &url)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        crate::runner::RunnerError::Status { status: 404, .. }
    ));
}

#[test]
fn sample_sheet_flow() {
    let mut deck = deck_from(SAMPLE);
    let frame = deck.frame(Instant::now());
    match frame.body {
        FrameBody::Cards(cards) => {
            let titles: Vec<_> = cards.iter().map(|c| c.title.as_str()).collect();
            assert_eq!(titles, vec!["Gem", "Coin"]);
        }
        other => panic!("unexpected body {other:?}"),
    }
    assert!(frame.controls.is_empty());

    deck.search("gem");
    assert_eq!(deck.store().filtered_len(), 1);
    assert_eq!(deck.cards().len(), 1);
    assert_eq!(deck.cards()[0].title, "Gem");

    deck.search("zzz");
    assert_eq!(deck.store().filtered_len(), 0);
    assert_eq!(
        deck.frame(Instant::now()).body,
        FrameBody::Message(NO_RESULTS.to_string())
    );
}

#[test]
fn searching_from_a_later_page_starts_over() {
    let mut csv = String::from("Reward,Description,Code\n");
    for i in 0..25 {
        csv.push_str(&format!("Gem {i},gems,G{i}\n"));
    }
    let mut deck = deck_from(&csv);
    assert!(deck.go(Control::Page(3)));
    assert_eq!(deck.store().current_page(), 3);
    deck.search("gem 1");
    assert_eq!(deck.store().current_page(), 1);
    // "Gem 1" and "Gem 10" through "Gem 19"
    assert_eq!(deck.store().filtered_len(), 11);
    assert_eq!(deck.store().total_pages(), 2);
}

#[test]
fn filtered_stays_a_subset_of_all() {
    let mut deck = deck_from("Reward,Code\nA,1\nB,2\nAB,3\nba,4\n");
    for q in ["", "a", "B", "ab", "x", " "] {
        deck.search(q);
        let all = deck.store().all();
        let mut last = None;
        for r in deck.store().filtered() {
            let pos = all.iter().position(|a| std::ptr::eq(a, r)).unwrap();
            assert!(last.map_or(true, |l| pos > l));
            last = Some(pos);
        }
    }
    deck.search("");
    assert_eq!(deck.store().filtered_len(), deck.store().all().len());
}

#[test]
fn malformed_rows_render_blank_fields() {
    let mut deck = deck_from("Reward,Description,Code\nLonely\n,,\n");
    deck.reveal_all();
    match deck.frame(Instant::now()).body {
        FrameBody::Cards(cards) => {
            assert_eq!(cards.len(), 2);
            assert_eq!(cards[0].title, "Lonely");
            assert_eq!(cards[0].body, "");
            assert!(cards[0].revealed);
            assert_eq!(cards[0].code, "");
            assert_eq!(cards[1].title, "");
        }
        other => panic!("unexpected body {other:?}"),
    }
}

#[test]
fn exported_page_carries_hidden_codes() {
    let mut deck = deck_from(SAMPLE);
    let frame = deck.frame(Instant::now());
    let html = String::from_utf8(crate::output::report::render_html(&frame, "")).unwrap();
    assert!(html.contains(r#"data-code="ABC123""#));
    assert!(html.contains(r#"<code class="font-mono text-emerald-400 font-bold">XYZ789</code>"#));
    assert!(!html.contains(r#"data-code="""#));
}

#[test]
fn header_only_sheet_from_a_seeded_store_has_no_results() {
    let mut store = CheatStore::new(10);
    store.load(crate::csv::parse_csv("Reward,Description,Code\n").unwrap());
    assert!(store.is_loaded());
    let mut deck = Deck::new(store, ImagePool::default());
    assert_eq!(
        deck.frame(Instant::now()).body,
        FrameBody::Message(NO_RESULTS.to_string())
    );
}
