//! Chain search demo
//!
//! Searches a small catalog every time the query changes, cancelling the
//! search for the previous query.

// Imports
use {
	std::time::Duration,
	tristate::{DataResult, Error, Inline, Observer, Source, chain_with},
};

/// Catalog to search
const CATALOG: &[&str] = &["anyhow", "futures", "parking_lot", "thiserror", "tokio", "tracing"];

/// Simulated search latency
const LATENCY: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
	tristate_logger::init();

	let query = Source::<String>::new();
	let searches = chain_with(
		&query,
		|query: &String| Ok(self::search(query.clone())),
		|query| Ok(!query.is_empty()),
	);
	let results = searches.map_with(Inline, |(query, results)| match results {
		Some(results) => Ok(results),
		None => Err(Error::msg(format!("No search for {query:?}"))),
	});

	let observer = Observer::<Vec<&str>>::new()
		.show_loading(|| tracing::info!("Searching..."))
		.data(|results: Vec<&str>| tracing::info!(?results, "Found results"))
		.empty(|| tracing::info!("No results"))
		.error(|err| tracing::warn!(%err, "Search failed"));

	tokio::spawn({
		let query = query.clone();
		async move {
			for value in ["t", "to", "tok", "", "zzz", "par"] {
				tracing::info!(query = value, "Updating query");
				query.set(value.to_owned());
				tokio::time::sleep(LATENCY * 2 / 3).await;
			}
		}
	});

	match tokio::time::timeout(LATENCY * 6, observer.observe(&results)).await {
		Ok(res) => res?,
		Err(_elapsed) => tracing::debug!("Stopped observing results"),
	}

	Ok(())
}

/// Searches the catalog for `query`, after some latency
fn search(query: String) -> Source<DataResult<Vec<&'static str>>> {
	let results = Source::with_value(DataResult::loading(None, None));
	tokio::spawn({
		let results = results.clone();
		async move {
			tokio::time::sleep(LATENCY).await;
			let found = CATALOG
				.iter()
				.copied()
				.filter(|name| name.contains(query.as_str()))
				.collect();
			tracing::debug!(%query, "Search finished");
			results.set(DataResult::success(found));
		}
	});

	results
}
