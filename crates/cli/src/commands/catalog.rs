//! Catalog commands: listing, one-shot search and live search.

use std::time::Duration;

use qkart_storefront::{SearchInput, Shop};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use super::{CliError, Context};
use crate::output;

/// List the full catalog.
pub async fn products(ctx: &mut Context) -> Result<(), CliError> {
    ctx.shop.load().await?;
    output::products(ctx.shop.catalog());
    Ok(())
}

/// Run a single search.
pub async fn search(ctx: &Context, text: &str) -> Result<(), CliError> {
    show_results(&ctx.shop, text).await
}

/// Treat each stdin line as the new search box value.
///
/// Queries only run once input has been quiet for `delay`. At end of input
/// a pending query runs immediately.
pub async fn browse(ctx: &Context, delay: Duration) -> Result<(), CliError> {
    let (mut input, mut queries) = SearchInput::new(delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last = None;

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => {
                    input.on_change(line.clone());
                    last = Some(line);
                }
                None => break,
            },
            Some(query) = queries.recv() => show_results(&ctx.shop, &query).await?,
        }
    }

    let pending = input.cancel();
    for query in remaining_queries(pending, &mut queries, last) {
        show_results(&ctx.shop, &query).await?;
    }

    Ok(())
}

/// Queries still to run once input has ended: everything already settled,
/// then `last` if it was cancelled while pending.
fn remaining_queries(
    pending: bool,
    queries: &mut UnboundedReceiver<String>,
    last: Option<String>,
) -> Vec<String> {
    let mut settled = Vec::new();
    while let Ok(query) = queries.try_recv() {
        settled.push(query);
    }
    // A query that fired while being cancelled is already in `settled`
    if pending && settled.last() != last.as_ref() {
        settled.extend(last);
    }
    settled
}

async fn show_results(shop: &Shop, text: &str) -> Result<(), CliError> {
    match shop.search(text).await {
        Ok(products) => output::products(&products),
        Err(e) if e.is_not_found() => {
            output::notices(&e.notices());
            output::products(&[]);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio::sync::mpsc;
    use tokio::time::sleep;

    use super::*;

    const DELAY: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn test_pending_query_runs_at_end_of_input() {
        let (mut input, mut queries) = SearchInput::new(DELAY);
        input.on_change("ba");
        input.on_change("bask");

        let pending = input.cancel();
        assert!(pending);
        assert_eq!(
            remaining_queries(pending, &mut queries, Some("bask".to_string())),
            vec!["bask"]
        );

        // The cancelled timer never delivers a second copy
        sleep(DELAY * 2).await;
        assert!(queries.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_query_is_not_repeated() {
        let (mut input, mut queries) = SearchInput::new(DELAY);
        input.on_change("bask");
        sleep(DELAY * 2).await;

        let pending = input.cancel();
        assert!(!pending);
        assert_eq!(
            remaining_queries(pending, &mut queries, Some("bask".to_string())),
            vec!["bask"]
        );
    }

    #[test]
    fn test_query_delivered_while_cancelling_runs_once() {
        let (tx, mut queries) = mpsc::unbounded_channel();
        tx.send("bask".to_string()).unwrap();

        assert_eq!(
            remaining_queries(true, &mut queries, Some("bask".to_string())),
            vec!["bask"]
        );
    }

    #[test]
    fn test_older_settled_query_runs_before_last() {
        let (tx, mut queries) = mpsc::unbounded_channel();
        tx.send("ba".to_string()).unwrap();

        assert_eq!(
            remaining_queries(true, &mut queries, Some("basketball".to_string())),
            vec!["ba", "basketball"]
        );
    }

    #[test]
    fn test_empty_input_has_nothing_to_run() {
        let (_tx, mut queries) = mpsc::unbounded_channel::<String>();
        assert!(remaining_queries(false, &mut queries, None).is_empty());
    }
}
