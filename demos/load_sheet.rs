use cheatdeck::runner::{Options, Runner, SheetSource, DEFAULT_SHEET_URL};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(Options {
        source: SheetSource::Url(DEFAULT_SHEET_URL.to_string()),
        page_size: 5,
        timeout_seconds: 15,
        ..Options::default()
    })?;
    let mut store = runner.load().await?;

    println!("Cheats: {}", store.all().len());
    store.set_query("gem");
    println!("Matching 'gem': {}", store.filtered_len());
    for r in store.visible() {
        println!("{} | {} | {}", r.reward(), r.description(), r.code());
    }

    Ok(())
}
