use std::fs;
use std::path::Path;

use medvisa::error::AppError;
use medvisa::workflows::clients::Client;

/// Load the initial client collection from a JSON seed file.
///
/// An empty array is reported as a load failure rather than "zero clients":
/// upstream the only way a populated deployment produces no rows is a broken
/// backend, so an empty result marks the distinguishable error state.
pub(crate) fn load_clients(path: &Path) -> Result<Vec<Client>, AppError> {
    let raw = fs::read_to_string(path).map_err(|err| AppError::Seed {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })?;

    let clients: Vec<Client> = serde_json::from_str(&raw).map_err(|err| AppError::Seed {
        path: path.to_path_buf(),
        detail: format!("invalid client JSON: {err}"),
    })?;

    if clients.is_empty() {
        return Err(AppError::Seed {
            path: path.to_path_buf(),
            detail: "seed file contained no clients".to_string(),
        });
    }

    Ok(clients)
}
