//! The vendor-API boundary.

use crate::ConnectorError;

/// Read-only view of the vendor store, as the crawl cycle needs it.
///
/// Implementations own all transport concerns: authentication, encoding of
/// paths onto the wire, retries. Every method here is a single logical
/// lookup; the cycle never holds vendor state between calls.
///
/// All container paths are canonical unencoded paths from the root site
/// (`""` for the root site itself), matching the decoded forms produced by
/// [`docid`].
pub trait VendorProxy {
    /// Names of the subsites directly beneath a site.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Vendor`] when the lookup fails.
    fn subsites(&self, site_path: &str) -> Result<Vec<String>, ConnectorError>;

    /// Names of the document libraries directly beneath a site.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Vendor`] when the lookup fails.
    fn libraries(&self, site_path: &str) -> Result<Vec<String>, ConnectorError>;

    /// Names of the lists directly beneath a site.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Vendor`] when the lookup fails.
    fn lists(&self, site_path: &str) -> Result<Vec<String>, ConnectorError>;

    /// Relative file paths of every document in a library, folder
    /// traversal included.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Vendor`] when the lookup fails.
    fn files(&self, library_path: &str) -> Result<Vec<String>, ConnectorError>;

    /// Row identifiers of every item in a list.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Vendor`] when the lookup fails.
    fn list_items(&self, list_path: &str) -> Result<Vec<String>, ConnectorError>;

    /// Attachment file names of one list item.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Vendor`] when the lookup fails.
    fn attachments(&self, list_path: &str, item_id: &str)
        -> Result<Vec<String>, ConnectorError>;

    /// Metadata field names defined on a library or list.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Vendor`] when the lookup fails.
    fn field_names(&self, container_path: &str) -> Result<Vec<String>, ConnectorError>;

    /// Last-modified instant of a document, item, or attachment, in epoch
    /// milliseconds. `Ok(None)` means the object no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Vendor`] when the lookup fails.
    fn modified(&self, path: &str) -> Result<Option<i64>, ConnectorError>;

    /// Creation instant of a document, item, or attachment, in epoch
    /// milliseconds, when the vendor exposes one.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Vendor`] when the lookup fails.
    fn created(&self, path: &str) -> Result<Option<i64>, ConnectorError>;

    /// Native access tokens of a document or item. `Ok(None)` means the
    /// object no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Vendor`] when the lookup fails.
    fn acls(&self, path: &str) -> Result<Option<Vec<String>>, ConnectorError>;
}
