//! Document storage trait.

use crate::StoreError;
use kinship_types::{DocumentId, DocumentType, MemberId, NodeId, Timestamp};
use serde::{Deserialize, Serialize};

/// An uploaded artifact bound to a user or a family member node.
///
/// Exactly one of `owner` / `family_member_node` is set; the binding is the
/// document's access scope. `public` widens visibility to same-family viewers.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocumentId,
    pub title: String,
    pub doc_type: DocumentType,
    pub description: String,
    /// Opaque file bytes with declared metadata.
    pub data: Vec<u8>,
    pub file_name: String,
    pub size: u64,
    pub mime_type: String,
    pub uploaded_by: MemberId,
    pub owner: Option<MemberId>,
    pub family_member_node: Option<NodeId>,
    pub public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Trait for document storage operations.
pub trait DocumentStore {
    fn insert_document(&self, record: &DocumentRecord) -> Result<(), StoreError>;
    fn get_document(&self, id: &DocumentId) -> Result<Option<DocumentRecord>, StoreError>;
    fn documents_by_owner(&self, owner: &MemberId) -> Result<Vec<DocumentRecord>, StoreError>;
    fn documents_by_node(&self, node: &NodeId) -> Result<Vec<DocumentRecord>, StoreError>;
}
