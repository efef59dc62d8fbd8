use crate::{entities::*, util::validate::CommentDraft};

#[derive(Debug, Clone, PartialEq)]
pub enum PendingOp {
    Create,
    Update { previous: Comment },
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryStatus {
    Committed,
    Pending(PendingOp),
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub comment: Comment,
    pub status: EntryStatus,
}

impl Entry {
    pub fn is_pending(&self) -> bool {
        matches!(self.status, EntryStatus::Pending(_))
    }
}

/// The comments of a place together with the comment form.
///
/// Local changes are staged as pending until the backend
/// has either confirmed them ([`CommentThread::commit`]) or
/// rejected them ([`CommentThread::rollback`]).
#[derive(Debug)]
pub struct CommentThread {
    place_id: Id,
    entries: Vec<Entry>,
    draft: CommentDraft,
    editing: Option<(Id, CommentDraft)>,
}

impl CommentThread {
    pub fn new(place_id: Id, comments: Vec<Comment>) -> Self {
        let entries = comments
            .into_iter()
            .map(|comment| Entry {
                comment,
                status: EntryStatus::Committed,
            })
            .collect();
        Self {
            place_id,
            entries,
            draft: CommentDraft::default(),
            editing: None,
        }
    }

    pub fn place_id(&self) -> &Id {
        &self.place_id
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: &Id) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.comment.id == id)
    }

    /// Only authors may edit or delete their comments.
    pub fn can_modify(comment: &Comment, viewer: Option<&Id>) -> bool {
        viewer.is_some_and(|user_id| comment.is_authored_by(user_id))
    }

    pub fn draft(&self) -> &CommentDraft {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: CommentDraft) {
        self.draft = draft;
    }

    pub fn clear_draft(&mut self) {
        self.draft = CommentDraft::default();
    }

    pub fn start_editing(&mut self, id: &Id) -> bool {
        let Some(entry) = self.get(id) else {
            return false;
        };
        if entry.is_pending() {
            return false;
        }
        let draft = CommentDraft::from(&entry.comment);
        self.editing = Some((id.clone(), draft));
        true
    }

    pub fn editing(&self) -> Option<&(Id, CommentDraft)> {
        self.editing.as_ref()
    }

    pub fn set_editing_draft(&mut self, draft: CommentDraft) {
        if let Some((_, d)) = &mut self.editing {
            *d = draft;
        }
    }

    pub fn stop_editing(&mut self) {
        self.editing = None;
    }

    /// Inserts a pending placeholder at the top and returns its temporary id.
    pub fn stage_create(&mut self, user_id: &Id, author: Author, content: CommentContent) -> Id {
        let id = Id::new();
        let CommentContent {
            rating,
            title,
            body,
        } = content;
        let comment = Comment {
            id: id.clone(),
            place_id: self.place_id.clone(),
            user_id: user_id.clone(),
            rating,
            title,
            body,
            created_at: Timestamp::now(),
            author,
        };
        self.entries.insert(
            0,
            Entry {
                comment,
                status: EntryStatus::Pending(PendingOp::Create),
            },
        );
        id
    }

    pub fn stage_update(&mut self, id: &Id, content: CommentContent) -> bool {
        let Some(entry) = self.committed_mut(id) else {
            return false;
        };
        let previous = entry.comment.clone();
        entry.comment.apply(content);
        entry.status = EntryStatus::Pending(PendingOp::Update { previous });
        true
    }

    pub fn stage_delete(&mut self, id: &Id) -> bool {
        let Some(entry) = self.committed_mut(id) else {
            return false;
        };
        entry.status = EntryStatus::Pending(PendingOp::Delete);
        true
    }

    /// Confirms a pending change. Created comments are
    /// replaced by the comment as stored by the backend.
    pub fn commit(&mut self, id: &Id, stored: Option<Comment>) {
        let Some(pos) = self.position(id) else {
            return;
        };
        match &self.entries[pos].status {
            EntryStatus::Committed => {}
            EntryStatus::Pending(PendingOp::Delete) => {
                self.entries.remove(pos);
            }
            EntryStatus::Pending(_) => {
                let entry = &mut self.entries[pos];
                if let Some(comment) = stored {
                    entry.comment = comment;
                }
                entry.status = EntryStatus::Committed;
            }
        }
    }

    /// Reverts a pending change.
    pub fn rollback(&mut self, id: &Id) {
        let Some(pos) = self.position(id) else {
            return;
        };
        let status = std::mem::replace(&mut self.entries[pos].status, EntryStatus::Committed);
        match status {
            EntryStatus::Pending(PendingOp::Create) => {
                self.entries.remove(pos);
            }
            EntryStatus::Pending(PendingOp::Update { previous }) => {
                self.entries[pos].comment = previous;
            }
            EntryStatus::Pending(PendingOp::Delete) | EntryStatus::Committed => {}
        }
    }

    fn position(&self, id: &Id) -> Option<usize> {
        self.entries.iter().position(|e| &e.comment.id == id)
    }

    fn committed_mut(&mut self, id: &Id) -> Option<&mut Entry> {
        self.entries
            .iter_mut()
            .find(|e| &e.comment.id == id && !e.is_pending())
    }
}
