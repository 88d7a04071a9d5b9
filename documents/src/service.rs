//! Document upload and scoped reads.

use crate::DocumentError;
use kinship_auth::Principal;
use kinship_notify::AuditTrail;
use kinship_store::{
    Directory, DocumentRecord, DocumentStore, FamilyTreeStore, MemberStore, NodeStore,
};
use kinship_types::{DocumentId, DocumentType, FamilyCode, MemberId, NodeId, Timestamp};
use std::sync::Arc;

/// An upload request. `size` is derived from the bytes; the mime type is the
/// uploader's declaration and is stored as-is.
#[derive(Clone, Debug)]
pub struct NewDocument {
    pub title: String,
    pub doc_type: DocumentType,
    pub description: String,
    pub data: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
    /// Personal-document scope.
    pub owner: Option<MemberId>,
    /// Family-member-node scope.
    pub family_member_node: Option<NodeId>,
    pub public: bool,
}

/// Document operations over one directory.
pub struct Documents<D: Directory> {
    dir: Arc<D>,
    audit: AuditTrail<D>,
}

impl<D: Directory> Documents<D> {
    pub fn new(dir: Arc<D>) -> Self {
        Self {
            audit: AuditTrail::new(dir.clone()),
            dir,
        }
    }

    /// Store an uploaded document.
    ///
    /// Title, type, and file bytes are required; exactly one of the two
    /// scope bindings must be set, and a node binding must resolve.
    pub fn upload(
        &self,
        new: NewDocument,
        uploader: &MemberId,
    ) -> Result<DocumentRecord, DocumentError> {
        if new.title.trim().is_empty() {
            return Err(DocumentError::InvalidInput("title".to_string()));
        }
        if new.data.is_empty() {
            return Err(DocumentError::InvalidInput("file".to_string()));
        }
        match (&new.owner, &new.family_member_node) {
            (Some(_), None) | (None, Some(_)) => {}
            _ => {
                return Err(DocumentError::InvalidInput(
                    "exactly one of owner or family member binding required".to_string(),
                ))
            }
        }
        if let Some(node_id) = &new.family_member_node {
            if self.dir.nodes().get_node(node_id)?.is_none() {
                return Err(DocumentError::NodeNotFound(node_id.to_string()));
            }
        }

        let now = Timestamp::now();
        let record = DocumentRecord {
            id: DocumentId::generate(),
            title: new.title.trim().to_string(),
            doc_type: new.doc_type,
            description: new.description,
            size: new.data.len() as u64,
            data: new.data,
            file_name: new.file_name,
            mime_type: new.mime_type,
            uploaded_by: uploader.clone(),
            owner: new.owner,
            family_member_node: new.family_member_node,
            public: new.public,
            created_at: now,
            updated_at: now,
        };
        self.dir.documents().insert_document(&record)?;

        self.audit.record_best_effort(
            uploader,
            "document.uploaded",
            "document",
            record.id.as_str(),
            None,
            Some(serde_json::json!({
                "title": record.title,
                "size": record.size,
                "public": record.public,
            })),
        );
        Ok(record)
    }

    /// Fetch one document, for the boundary to feed through
    /// [`Self::visible_to`] before serving it.
    pub fn document(&self, id: &DocumentId) -> Result<DocumentRecord, DocumentError> {
        self.dir
            .documents()
            .get_document(id)?
            .ok_or_else(|| DocumentError::NotFound(id.to_string()))
    }

    /// A user's personal documents. The boundary applies
    /// `can_access_user_data` before exposing these.
    pub fn user_documents(&self, user_id: &MemberId) -> Result<Vec<DocumentRecord>, DocumentError> {
        let mut docs = self.dir.documents().documents_by_owner(user_id)?;
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(docs)
    }

    /// Documents bound to a family member node. The boundary applies the
    /// same-family check (and [`Self::visible_to`] for the public filter).
    pub fn family_member_documents(
        &self,
        node_id: &NodeId,
    ) -> Result<Vec<DocumentRecord>, DocumentError> {
        let mut docs = self.dir.documents().documents_by_node(node_id)?;
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(docs)
    }

    /// Whether a principal may see a document.
    ///
    /// Admins and the uploader always may. User-bound documents follow
    /// `can_access_user_data`, widened to same-family viewers when public.
    /// Node-bound documents are scoped-readable by the member the node
    /// represents; other same-family viewers see only public ones.
    pub fn visible_to(
        &self,
        doc: &DocumentRecord,
        principal: &Principal,
    ) -> Result<bool, DocumentError> {
        if principal.is_admin() || principal.member_id == doc.uploaded_by {
            return Ok(true);
        }
        if let Some(owner) = &doc.owner {
            if principal.can_access_user_data(owner) {
                return Ok(true);
            }
            if !doc.public {
                return Ok(false);
            }
            return match self.family_of_member(owner)? {
                Some(code) => Ok(principal.is_same_family(&code)),
                None => Ok(false),
            };
        }
        if let Some(node_id) = &doc.family_member_node {
            let Some(node) = self.dir.nodes().get_node(node_id)? else {
                return Ok(false);
            };
            if principal.can_access_user_data(&node.member_id) {
                return Ok(true);
            }
            let Some(tree) = self.dir.trees().get_tree(&node.tree_id)? else {
                return Ok(false);
            };
            return Ok(doc.public && principal.is_same_family(&tree.family_code));
        }
        Ok(false)
    }

    /// Drop the documents a principal may not see.
    pub fn filter_visible(
        &self,
        docs: Vec<DocumentRecord>,
        principal: &Principal,
    ) -> Result<Vec<DocumentRecord>, DocumentError> {
        let mut visible = Vec::with_capacity(docs.len());
        for doc in docs {
            if self.visible_to(&doc, principal)? {
                visible.push(doc);
            }
        }
        Ok(visible)
    }

    fn family_of_member(&self, member_id: &MemberId) -> Result<Option<FamilyCode>, DocumentError> {
        Ok(self
            .dir
            .members()
            .get_member(member_id)?
            .and_then(|m| m.family_code))
    }
}
