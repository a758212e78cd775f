/// Request lanes. Page loads and searches share the `List` lane since both
/// replace the list wholesale; a stale page response must not clobber newer
/// search results or vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Detail,
    Insight,
    Save,
    Delete,
}

/// Handle for one issued request. A response is applied only when its
/// ticket is still the latest issued on its lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub(crate) action: Action,
    pub(crate) seq: u64,
}

impl Ticket {
    pub fn action(&self) -> Action {
        self.action
    }
}

/// Monotonic counter per lane.
#[derive(Debug, Default)]
pub(crate) struct Lanes {
    list: u64,
    detail: u64,
    insight: u64,
    save: u64,
    delete: u64,
}

impl Lanes {
    pub(crate) fn issue(&mut self, action: Action) -> Ticket {
        let slot = self.slot_mut(action);
        *slot += 1;
        Ticket {
            action,
            seq: *slot,
        }
    }

    pub(crate) fn is_current(&self, ticket: Ticket) -> bool {
        self.slot(ticket.action) == ticket.seq
    }

    fn slot(&self, action: Action) -> u64 {
        match action {
            Action::List => self.list,
            Action::Detail => self.detail,
            Action::Insight => self.insight,
            Action::Save => self.save,
            Action::Delete => self.delete,
        }
    }

    fn slot_mut(&mut self, action: Action) -> &mut u64 {
        match action {
            Action::List => &mut self.list,
            Action::Detail => &mut self.detail,
            Action::Insight => &mut self.insight,
            Action::Save => &mut self.save,
            Action::Delete => &mut self.delete,
        }
    }
}
