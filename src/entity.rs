//! What the engine needs to know about a paginated entity kind.

use crate::cursor::CursorCodec;
use crate::sort::OrderField;
use crate::value::Value;

/// An entity kind that can be paginated.
///
/// `key` is the tie-break key: unique within the kind, assigned in increasing
/// order at creation. Every ordering ends with it.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Kind name embedded in cursors and global IDs.
    const KIND: &'static str;

    /// Name used for the connection in user-facing messages.
    const NAME: &'static str;

    /// Attributes free-text search looks at.
    const SEARCH_ATTRIBUTES: &'static [&'static str] = &[];

    /// Public ordering enum of this kind.
    type Order: OrderField;

    fn key(&self) -> u64;

    /// Current value of a sortable or filterable attribute.
    ///
    /// Unknown names yield [`Value::Null`].
    fn attribute(&self, name: &str) -> Value;

    fn cursor(&self) -> String {
        CursorCodec::encode(Self::KIND, self.key())
    }
}
