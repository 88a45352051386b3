//! The catalog tool set: descriptors and execution functions binding the
//! dispatcher to the music catalog.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::server::{FnToolHandler, Server};
use crate::spotify::MusicCatalog;
use crate::types::{McpError, Tool};

const DEFAULT_SEARCH_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    limit: i64,
}

#[derive(Debug, Deserialize)]
struct GetTrackArgs {
    track_id: String,
}

// An omitted limit decodes to 0; both mean "use the default". Anything else
// is passed through to the catalog verbatim, out-of-range included.
fn effective_limit(limit: i64) -> i64 {
    if limit == 0 { DEFAULT_SEARCH_LIMIT } else { limit }
}

/// Register the catalog tools on the given server.
pub fn register_all(srv: &mut Server, catalog: Arc<dyn MusicCatalog>) {
    let c = catalog.clone();
    srv.register_tool(
        search_tracks_tool(),
        FnToolHandler::new(move |args: Value| {
            let catalog = c.clone();
            async move {
                let args: SearchArgs = serde_json::from_value(args)?;
                let result = catalog
                    .search_tracks(&args.query, effective_limit(args.limit))
                    .await?;
                Ok(result.to_string())
            }
        }),
    );

    let c = catalog.clone();
    srv.register_tool(
        search_artists_tool(),
        FnToolHandler::new(move |args: Value| {
            let catalog = c.clone();
            async move {
                let args: SearchArgs = serde_json::from_value(args)?;
                let result = catalog
                    .search_artists(&args.query, effective_limit(args.limit))
                    .await?;
                Ok(result.to_string())
            }
        }),
    );

    let c = catalog;
    srv.register_tool(
        get_track_tool(),
        FnToolHandler::new(move |args: Value| {
            let catalog = c.clone();
            async move {
                let args: GetTrackArgs = serde_json::from_value(args)?;
                let track = catalog.get_track(&args.track_id).await?;
                Ok(track.to_string())
            }
        }),
    );
}

fn search_tracks_tool() -> Tool {
    Tool {
        name: "search_tracks".into(),
        description: "Search for tracks on Spotify".into(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query for tracks",
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of results (default: 10)",
                    "minimum": 1,
                    "maximum": 50,
                },
            },
            "required": ["query"],
        }),
    }
}

fn search_artists_tool() -> Tool {
    Tool {
        name: "search_artists".into(),
        description: "Search for artists on Spotify".into(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query for artists",
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of results (default: 10)",
                    "minimum": 1,
                    "maximum": 50,
                },
            },
            "required": ["query"],
        }),
    }
}

fn get_track_tool() -> Tool {
    Tool {
        name: "get_track".into(),
        description: "Get detailed information about a specific track".into(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "track_id": {
                    "type": "string",
                    "description": "Spotify track ID",
                },
            },
            "required": ["track_id"],
        }),
    }
}
