//! Background search on a forked board.
//!
//! The worker owns a deep copy of the live board, so the foreground may keep
//! using (or even mutating) the live board while the search runs. The result
//! comes back over a channel and is merged with [`SearchOutcome::apply`],
//! which refuses it if the live board has moved on.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use log::info;

use crate::chess_errors::{SearchError, SearchResult};
use crate::game_state::board::Board;
use crate::search::board_scoring::BoardScorer;
use crate::search::searcher::{Search, SearchOutcome};

/// Handle of one search running on a worker thread.
#[derive(Debug)]
pub struct BackgroundSearch {
    receiver: Receiver<SearchOutcome>,
    handle: Option<JoinHandle<()>>,
    searched_turn: u32,
}

impl BackgroundSearch {
    /// Fork `board` and search the copy on a new thread. `search` is cloned,
    /// so depth tuning done by the worker is visible through `search`.
    pub fn spawn<S>(search: &Search, board: &Board, scorer: S) -> Self
    where
        S: BoardScorer + 'static,
    {
        let mut fork = board.fork();
        let search = search.clone();
        let searched_turn = board.turn();
        let (sender, receiver) = mpsc::channel();

        let handle = thread::spawn(move || {
            let outcome = search.search(&mut fork, &scorer);
            // The receiver may already be gone; the result is then unused.
            let _ = sender.send(outcome);
        });
        info!("background search spawned at ply {searched_turn}");

        Self {
            receiver,
            handle: Some(handle),
            searched_turn,
        }
    }

    /// Ply of the position being searched.
    pub fn searched_turn(&self) -> u32 {
        self.searched_turn
    }

    /// True once the worker thread has finished.
    pub fn is_done(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Non-blocking poll. `Ok(None)` while the search is still running.
    pub fn try_result(&mut self) -> SearchResult<Option<SearchOutcome>> {
        match self.receiver.try_recv() {
            Ok(outcome) => {
                self.join()?;
                Ok(Some(outcome))
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                self.join()?;
                Err(SearchError::WorkerDisconnected)
            }
        }
    }

    /// Block until the search is done.
    pub fn wait(mut self) -> SearchResult<SearchOutcome> {
        match self.receiver.recv() {
            Ok(outcome) => {
                self.join()?;
                Ok(outcome)
            }
            Err(_) => {
                self.join()?;
                Err(SearchError::WorkerDisconnected)
            }
        }
    }

    fn join(&mut self) -> SearchResult<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        handle.join().map_err(|_| SearchError::WorkerPanicked)?;
        info!("background search joined for ply {}", self.searched_turn);
        Ok(())
    }
}
