use crate::domain::entities::page::RenderPayload;

/// Remembers the last emitted payload so unchanged payloads are not re-sent.
#[derive(Debug, Clone)]
pub struct PayloadEmitter<T> {
    last: Option<RenderPayload<T>>,
}

impl<T> Default for PayloadEmitter<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: Clone + PartialEq> PayloadEmitter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `payload` and returns the names of the fields that differ from
    /// the previous one. Empty means nothing observable changed.
    pub fn observe(&mut self, payload: &RenderPayload<T>) -> Vec<&'static str> {
        let changed = match &self.last {
            Some(previous) => changed_fields(previous, payload),
            None => vec!["list", "total", "pageNum", "pageSize", "loading", "hasMore"],
        };
        if !changed.is_empty() {
            self.last = Some(payload.clone());
        }
        changed
    }

    pub fn last(&self) -> Option<&RenderPayload<T>> {
        self.last.as_ref()
    }
}

pub fn changed_fields<T: PartialEq>(
    previous: &RenderPayload<T>,
    next: &RenderPayload<T>,
) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if previous.list != next.list {
        changed.push("list");
    }
    if previous.total != next.total {
        changed.push("total");
    }
    if previous.page_num != next.page_num {
        changed.push("pageNum");
    }
    if previous.page_size != next.page_size {
        changed.push("pageSize");
    }
    if previous.loading != next.loading {
        changed.push("loading");
    }
    if previous.has_more != next.has_more {
        changed.push("hasMore");
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_payload_is_not_reemitted() {
        let mut emitter = PayloadEmitter::new();
        let payload = RenderPayload {
            list: vec!["a"],
            total: 1,
            page_num: 1,
            page_size: 10,
            loading: false,
            has_more: false,
        };

        assert_eq!(emitter.observe(&payload).len(), 6);
        assert!(emitter.observe(&payload.clone()).is_empty());

        let loading = RenderPayload {
            loading: true,
            ..payload
        };
        assert_eq!(emitter.observe(&loading), vec!["loading"]);
    }
}
