use serde::Serialize;

/// Response for every delete command.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: u64,
    pub ids: Vec<String>,
}

/// Drop blanks and repeated ids, keeping first-seen order.
#[must_use]
pub fn unique_ids(ids: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
        if !out.iter().any(|seen| seen == id) {
            out.push(id.to_string());
        }
    }
    out
}
