//! In-memory resolver used as a test double.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::Mutex;

use super::{Content, ResolveError, Resolver};

/// Serves fixed contents by exact URL and records every request.
#[derive(Debug, Default)]
pub struct FakeResolver {
    contents: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
    not_supported: bool,
}

impl FakeResolver {
    pub fn new<'a>(contents: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            contents: contents
                .into_iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// A resolver that declines every reference.
    pub fn not_supported() -> Self {
        Self {
            not_supported: true,
            ..Self::default()
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Resolver for FakeResolver {
    fn get(&self, reference: &str) -> Result<Content, ResolveError> {
        self.requested.lock().unwrap().push(reference.to_string());

        if self.not_supported {
            return Err(ResolveError::NotSupported);
        }

        match self.contents.get(reference) {
            Some(body) => Ok(Box::new(Cursor::new(body.clone().into_bytes()))),
            None => Err(ResolveError::Status {
                url: reference.to_string(),
                status: reqwest::StatusCode::NOT_FOUND,
            }),
        }
    }
}

pub fn read_all(mut content: Content) -> String {
    let mut out = String::new();
    content.read_to_string(&mut out).unwrap();
    out
}
