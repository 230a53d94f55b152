use crate::cli::args::CliArgs;
use crate::output::OutputFormat;
use crate::runner::MAX_PAGE_SIZE;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(page_size) = args.page_size {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(format!(
                "invalid page-size, expected 1 to {MAX_PAGE_SIZE}"
            ));
        }
    }
    if let Some(page) = args.page {
        if page == 0 {
            return Err("invalid page, pages start at 1".to_string());
        }
    }
    if let Some(raw) = args.url.as_deref() {
        reqwest::Url::parse(raw.trim()).map_err(|e| format!("invalid --url '{raw}': {e}"))?;
    }
    if let Some(raw) = args.output_format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text, json or html"
            ));
        }
    }
    if args.interactive && args.output.is_some() {
        return Err("--interactive cannot be combined with --output".to_string());
    }
    Ok(())
}
