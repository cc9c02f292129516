//! Name Stream
//!
//! Pull-based delivery of a listing snapshot, plus a channel feed
//! for consumers that want a producer thread.

use std::panic;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver};

use crate::key::Category;

use super::CancelToken;

/// Sorted snapshot of names for one category
///
/// The names are fixed when the stream is created. The stream is finite
/// and cannot be restarted. Once the token is cancelled, `next` returns
/// `None` and the remaining names are dropped.
pub struct NameStream {
    category: Category,
    names: std::vec::IntoIter<String>,
    cancel: CancelToken,
    delivered: usize,
}

impl NameStream {
    /// `names` must already be sorted
    pub(crate) fn new(category: Category, names: Vec<String>, cancel: CancelToken) -> Self {
        Self {
            category,
            names: names.into_iter(),
            cancel,
            delivered: 0,
        }
    }

    /// Category this stream lists
    pub fn category(&self) -> Category {
        self.category
    }

    /// Names not yet delivered (0 after cancellation)
    pub fn remaining(&self) -> usize {
        self.names.len()
    }

    /// Names delivered so far
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Move delivery onto a producer thread
    ///
    /// The thread sends each name over a channel bounded by `capacity`
    /// and exits as soon as the token is cancelled or the receiver is
    /// dropped, whichever comes first.
    pub fn into_channel(self, capacity: usize) -> ListFeed {
        let (tx, rx) = channel::bounded(capacity);
        let NameStream {
            category,
            names,
            cancel,
            ..
        } = self;
        let feed_cancel = cancel.clone();

        let handle = thread::spawn(move || {
            let mut sent = 0usize;
            let done = cancel.done();

            for name in names {
                if cancel.is_cancelled() {
                    break;
                }
                // false once the token fires or the receiver is dropped
                let delivered = crossbeam::select! {
                    send(tx, name) -> res => res.is_ok(),
                    recv(done) -> _ => false,
                };
                if !delivered {
                    break;
                }
                sent += 1;
            }

            tracing::trace!("List feed for {} finished after {} names", category, sent);
            sent
        });

        ListFeed {
            receiver: rx,
            cancel: feed_cancel,
            handle,
        }
    }
}

impl Iterator for NameStream {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.cancel.is_cancelled() {
            // Drop whatever is left so the snapshot is released now
            self.names = Vec::new().into_iter();
            return None;
        }

        let name = self.names.next()?;
        self.delivered += 1;
        tracing::trace!("List {}: {}", self.category, name);
        Some(name)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.names.len()))
    }
}

/// Names delivered by a producer thread
///
/// The iterators check the token before every receive, so names already
/// buffered in the channel are not delivered once the listing is
/// cancelled.
pub struct ListFeed {
    receiver: Receiver<String>,
    cancel: CancelToken,
    handle: JoinHandle<usize>,
}

impl ListFeed {
    /// Raw receiving end of the feed; closed once the producer exits
    ///
    /// Receiving from it directly bypasses the cancellation check.
    pub fn receiver(&self) -> &Receiver<String> {
        &self.receiver
    }

    /// Blocking iterator over the remaining names; ends on cancel
    pub fn iter(&self) -> FeedIter<'_> {
        FeedIter {
            receiver: &self.receiver,
            cancel: &self.cancel,
        }
    }

    /// Drop the receiver and wait for the producer to exit
    ///
    /// Returns how many names the producer handed over. Dropping the
    /// receiver first means this never waits on a consumer. A panic in
    /// the producer is resumed on the calling thread.
    pub fn join(self) -> usize {
        let ListFeed {
            receiver, handle, ..
        } = self;
        drop(receiver);
        match handle.join() {
            Ok(sent) => sent,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

impl IntoIterator for ListFeed {
    type Item = String;
    type IntoIter = FeedIntoIter;

    /// Consume the feed; the producer is detached and exits on its own
    fn into_iter(self) -> Self::IntoIter {
        FeedIntoIter {
            receiver: Some(self.receiver),
            cancel: self.cancel,
        }
    }
}

/// Borrowing iterator returned by `ListFeed::iter`
pub struct FeedIter<'a> {
    receiver: &'a Receiver<String>,
    cancel: &'a CancelToken,
}

impl Iterator for FeedIter<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        recv_unless_cancelled(self.receiver, self.cancel)
    }
}

/// Owning iterator returned by `ListFeed::into_iter`
///
/// Drops the receiver as soon as the feed ends or is cancelled.
pub struct FeedIntoIter {
    receiver: Option<Receiver<String>>,
    cancel: CancelToken,
}

impl Iterator for FeedIntoIter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let name = recv_unless_cancelled(self.receiver.as_ref()?, &self.cancel);
        if name.is_none() {
            self.receiver = None;
        }
        name
    }
}

/// Wait for the next name, giving up once `cancel` fires
///
/// A name that arrives together with the cancel is dropped.
fn recv_unless_cancelled(receiver: &Receiver<String>, cancel: &CancelToken) -> Option<String> {
    if cancel.is_cancelled() {
        return None;
    }
    let name = crossbeam::select! {
        recv(receiver) -> msg => msg.ok(),
        recv(cancel.done()) -> _ => None,
    };
    if cancel.is_cancelled() {
        return None;
    }
    name
}
