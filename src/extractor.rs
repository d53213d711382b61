//! Route extraction from a single controller descriptor.
//!
//! The extractor enumerates a controller's members in declaration order,
//! reads each member's declared path and verb through the injected
//! [`MetadataReader`], and produces normalized [`RouteRecord`]s. Members
//! lacking path or verb metadata are ordinary methods, not endpoints, and
//! are skipped silently. A metadata failure on one member skips only that
//! member.

use log::{debug, warn};

use crate::metadata::{MetadataError, MetadataReader, MetadataValue, METHOD_KEY, PATH_KEY};
use crate::model::{ControllerRef, EndpointDescriptor, RouteRecord};
use crate::path;

/// Declared HTTP verbs with a canonical name.
///
/// Declarative route metadata may carry verbs as numeric codes; this is
/// the known code table. `ALL` matches every verb at request time and is
/// reported as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    All,
    Options,
    Head,
}

impl Verb {
    /// Maps a known numeric verb code to its verb.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Verb::Get),
            1 => Some(Verb::Post),
            2 => Some(Verb::Put),
            3 => Some(Verb::Delete),
            4 => Some(Verb::Patch),
            5 => Some(Verb::All),
            6 => Some(Verb::Options),
            7 => Some(Verb::Head),
            _ => None,
        }
    }

    /// Parses a canonical verb name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Some(Verb::Get),
            "POST" => Some(Verb::Post),
            "PUT" => Some(Verb::Put),
            "DELETE" => Some(Verb::Delete),
            "PATCH" => Some(Verb::Patch),
            "ALL" => Some(Verb::All),
            "OPTIONS" => Some(Verb::Options),
            "HEAD" => Some(Verb::Head),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Patch => "PATCH",
            Verb::All => "ALL",
            Verb::Options => "OPTIONS",
            Verb::Head => "HEAD",
        }
    }
}

/// Canonical uppercase name for a declared verb value.
///
/// Unrecognized codes and names fall back to their stringified, uppercased
/// form instead of failing. Returns `None` only for values that are not
/// verb-shaped at all.
pub fn normalize_verb(value: &MetadataValue) -> Option<String> {
    match value {
        MetadataValue::Code(code) => Some(match Verb::from_code(*code) {
            Some(verb) => verb.as_str().to_string(),
            None => code.to_string().to_uppercase(),
        }),
        MetadataValue::Text(name) => Some(match Verb::from_name(name) {
            Some(verb) => verb.as_str().to_string(),
            None => name.to_uppercase(),
        }),
        _ => None,
    }
}

/// Extracts route records from one controller descriptor.
pub struct RouteExtractor<'a> {
    reader: &'a dyn MetadataReader,
}

impl<'a> RouteExtractor<'a> {
    pub fn new(reader: &'a dyn MetadataReader) -> Self {
        Self { reader }
    }

    /// Returns the controller's routes in member declaration order.
    ///
    /// A controller whose own base-path metadata cannot be read is treated
    /// as invalid and yields no routes, without error.
    pub fn extract_routes(&self, controller: &ControllerRef, prefix: Option<&str>) -> Vec<RouteRecord> {
        let base_path = match self.reader.get(controller.as_ref(), PATH_KEY) {
            Ok(Some(value)) => value.as_text().unwrap_or("").to_string(),
            Ok(None) => String::new(),
            Err(e) => {
                warn!("skipping controller {}: {}", controller.name(), e);
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        for member in controller.members() {
            match self.extract_member(controller.name(), &base_path, member, prefix) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => {
                    debug!("skipping member {}.{}: {}", controller.name(), member.name(), e);
                }
            }
        }
        records
    }

    fn extract_member(
        &self,
        controller_name: &str,
        base_path: &str,
        member: &EndpointDescriptor,
        prefix: Option<&str>,
    ) -> Result<Option<RouteRecord>, MetadataError> {
        let path = self.reader.get(member, PATH_KEY)?;
        let verb = self.reader.get(member, METHOD_KEY)?;

        // A member lacking either declaration is an ordinary method.
        let (path, verb) = match (path, verb) {
            (Some(path), Some(verb)) => (path, verb),
            _ => return Ok(None),
        };

        let route_path = path
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| MetadataError::wrong_type(member.name(), PATH_KEY))?;
        let method = normalize_verb(&verb)
            .ok_or_else(|| MetadataError::wrong_type(member.name(), METHOD_KEY))?;

        Ok(Some(RouteRecord {
            method,
            path: path::normalize(prefix, Some(base_path), Some(&route_path)),
            handler: format!("{}.{}", controller_name, member.name()),
        }))
    }
}
