use crate::domain::entities::page::QueryParams;
use crate::usecase::ports::fetcher::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecState {
    Idle,
    Fetching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Replace,
    Append,
}

/// One issued fetch. The generation is the staleness guard: a ticket whose
/// generation is no longer current settles as [`Settlement::Stale`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub generation: u64,
    pub kind: FetchKind,
    pub params: QueryParams,
}

impl FetchTicket {
    pub fn page_num(&self) -> u32 {
        self.params.page_num().unwrap_or(1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    Applied,
    Failed(FetchError),
    Stale,
}

/// Monotonic generation counter plus the generation currently in flight.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    generation: u64,
    current: Option<u64>,
}

impl InFlight {
    pub fn issue(&mut self) -> u64 {
        self.generation += 1;
        self.current = Some(self.generation);
        self.generation
    }

    /// Clears the in-flight slot if `generation` is the one being waited on.
    pub fn accept(&mut self, generation: u64) -> bool {
        if self.current == Some(generation) {
            self.current = None;
            return true;
        }
        false
    }

    /// Forgets whatever is in flight; its result will be stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.current = None;
    }

    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    pub fn state(&self) -> ExecState {
        if self.is_busy() {
            ExecState::Fetching
        } else {
            ExecState::Idle
        }
    }
}
