//! Background search thread.
//!
//! The host hands a snapshot of the game to the worker and polls (or blocks)
//! for the answer, so long searches never run on the interactive thread. The
//! worker owns its engine and every snapshot it receives; nothing is shared.
//!
//! Cancellation is coarse. `reset` bumps a generation counter and any result
//! from an earlier generation is dropped when it arrives instead of being
//! handed back.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::{EngineError, EngineResult};
use crate::game_state::board_types::PieceKind;
use crate::game_state::game_state::GameState;

enum WorkerRequest<K> {
    Search {
        ticket: u64,
        generation: u64,
        snapshot: GameState<K>,
    },
    NewGame,
}

struct WorkerReply {
    ticket: u64,
    generation: u64,
    outcome: EngineResult<EngineOutput>,
}

/// A finished search, tagged with the ticket `submit` returned.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub ticket: u64,
    pub output: EngineOutput,
}

pub struct SearchWorker<K> {
    requests: Option<Sender<WorkerRequest<K>>>,
    replies: Receiver<WorkerReply>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
    next_ticket: u64,
    in_flight: usize,
}

impl<K: PieceKind> SearchWorker<K> {
    pub fn spawn(mut engine: Box<dyn Engine<K>>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<WorkerRequest<K>>();
        let (reply_tx, reply_rx) = mpsc::channel::<WorkerReply>();

        let handle = thread::spawn(move || {
            for request in request_rx {
                match request {
                    WorkerRequest::Search {
                        ticket,
                        generation,
                        snapshot,
                    } => {
                        let outcome = engine.choose_move(&snapshot);
                        debug!(ticket, generation, engine = engine.name(), "worker search done");
                        let reply = WorkerReply {
                            ticket,
                            generation,
                            outcome,
                        };
                        if reply_tx.send(reply).is_err() {
                            break;
                        }
                    }
                    WorkerRequest::NewGame => engine.new_game(),
                }
            }
        });

        Self {
            requests: Some(request_tx),
            replies: reply_rx,
            handle: Some(handle),
            generation: 0,
            next_ticket: 0,
            in_flight: 0,
        }
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn send(&self, request: WorkerRequest<K>) -> EngineResult<()> {
        self.requests
            .as_ref()
            .ok_or(EngineError::WorkerDisconnected)?
            .send(request)
            .map_err(|_| EngineError::WorkerDisconnected)
    }

    /// Queue a search of `snapshot`. Returns the ticket its result will carry.
    pub fn submit(&mut self, snapshot: GameState<K>) -> EngineResult<u64> {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.send(WorkerRequest::Search {
            ticket,
            generation: self.generation,
            snapshot,
        })?;
        self.in_flight += 1;
        Ok(ticket)
    }

    /// Forget every search requested so far and tell the engine a new game began.
    pub fn reset(&mut self) -> EngineResult<()> {
        self.generation += 1;
        self.send(WorkerRequest::NewGame)
    }

    /// Unwrap a reply, or `None` when it belongs to an earlier generation.
    fn accept(&mut self, reply: WorkerReply) -> EngineResult<Option<SearchOutcome>> {
        self.in_flight = self.in_flight.saturating_sub(1);
        if reply.generation != self.generation {
            warn!(
                ticket = reply.ticket,
                generation = reply.generation,
                current = self.generation,
                "discarding stale search result"
            );
            return Ok(None);
        }
        let output = reply.outcome?;
        Ok(Some(SearchOutcome {
            ticket: reply.ticket,
            output,
        }))
    }

    /// Non-blocking poll for a current result.
    pub fn try_result(&mut self) -> EngineResult<Option<SearchOutcome>> {
        loop {
            match self.replies.try_recv() {
                Ok(reply) => {
                    if let Some(outcome) = self.accept(reply)? {
                        return Ok(Some(outcome));
                    }
                }
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => return Err(EngineError::WorkerDisconnected),
            }
        }
    }

    /// Block until a current result arrives. `None` when nothing current is in flight.
    pub fn wait_result(&mut self) -> EngineResult<Option<SearchOutcome>> {
        while self.in_flight > 0 {
            let reply = self
                .replies
                .recv()
                .map_err(|_| EngineError::WorkerDisconnected)?;
            if let Some(outcome) = self.accept(reply)? {
                return Ok(Some(outcome));
            }
        }
        Ok(None)
    }
}

impl<K> Drop for SearchWorker<K> {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::engines::engine_config::EngineConfig;
    use crate::engines::engine_minimax::MinimaxEngine;
    use crate::engines::engine_random::RandomEngine;
    use crate::game_state::board_types::{CheckersKind, ChessKind};
    use crate::rules::checkers_rules::CheckersRules;
    use crate::rules::chess_rules::ChessRules;
    use crate::rules::rule_engine::RuleEngine;

    #[test]
    fn returns_a_legal_move_for_the_snapshot() {
        let engine = MinimaxEngine::chess(EngineConfig {
            depth_override: Some(2),
            seed: Some(1),
            ..EngineConfig::default()
        });
        let mut worker: SearchWorker<ChessKind> = SearchWorker::spawn(Box::new(engine));
        let state = ChessRules.new_game();

        let ticket = worker.submit(state.clone()).expect("worker should accept work");
        let outcome = worker
            .wait_result()
            .expect("worker should answer")
            .expect("a result is in flight");
        assert_eq!(outcome.ticket, ticket);
        let mv = outcome.output.best_move.expect("white has opening moves");
        assert!(ChessRules.is_legal(&state, mv.from, mv.to));
    }

    #[test]
    fn results_from_before_a_reset_are_discarded() {
        let engine: Box<dyn Engine<CheckersKind>> =
            Box::new(RandomEngine::new(CheckersRules, Some(8)));
        let mut worker = SearchWorker::spawn(engine);
        let state = CheckersRules.new_game();

        worker.submit(state.clone()).expect("worker should accept work");
        worker.reset().expect("worker should accept reset");
        assert_eq!(worker.generation(), 1);
        assert!(worker.wait_result().expect("worker should answer").is_none());

        let ticket = worker.submit(state).expect("worker should accept work");
        let outcome = worker
            .wait_result()
            .expect("worker should answer")
            .expect("a current result is in flight");
        assert_eq!(outcome.ticket, ticket);
        assert_eq!(ticket, 2);
    }

    #[test]
    fn polling_eventually_yields_the_result() {
        let mut worker: SearchWorker<CheckersKind> =
            SearchWorker::spawn(Box::new(RandomEngine::new(CheckersRules, Some(2))));
        assert!(worker.try_result().expect("poll should succeed").is_none());

        worker
            .submit(CheckersRules.new_game())
            .expect("worker should accept work");
        let mut outcome = None;
        for _ in 0..500 {
            outcome = worker.try_result().expect("poll should succeed");
            if outcome.is_some() {
                break;
            }
            thread::sleep(Duration::from_millis(2));
        }
        assert!(outcome.is_some(), "worker never answered");
    }
}
