//! Center synchronization between a primary and a secondary view
//!
//! The synchronizer waits for the secondary view's camera to come to rest
//! once, then copies every later secondary center onto the primary view.
//!
//! ```text
//! Waiting --(secondary.stationary == true, once)--> Bridging
//! Waiting | Bridging --dispose()--> Disposed
//! ```
//!
//! Entering `Bridging` installs the center watch first and then releases the
//! stationary watch, from inside the stationary callback itself.

use crate::view::{Point, View, WatchHandle};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Waiting,
    Bridging,
    Disposed,
}

enum SyncState {
    Waiting { stationary: WatchHandle },
    Bridging { center: WatchHandle },
    Disposed,
}

impl SyncState {
    fn phase(&self) -> SyncPhase {
        match self {
            SyncState::Waiting { .. } => SyncPhase::Waiting,
            SyncState::Bridging { .. } => SyncPhase::Bridging,
            SyncState::Disposed => SyncPhase::Disposed,
        }
    }
}

struct Link {
    primary: Weak<dyn View>,
    secondary: Weak<dyn View>,
    state: SyncState,
}

impl Link {
    fn on_stationary(link: &Weak<RefCell<Link>>) {
        let Some(link) = link.upgrade() else {
            return;
        };
        match link.try_borrow_mut() {
            Ok(mut link) => link.bridge(),
            Err(_) => tracing::warn!("stationary change delivered while link is busy"),
        };
    }

    fn bridge(&mut self) {
        if !matches!(self.state, SyncState::Waiting { .. }) {
            return;
        }
        let Some(secondary) = self.secondary.upgrade() else {
            return;
        };

        let primary = self.primary.clone();
        let center = secondary.watch_center(Box::new(move |center: &Point, _: &Point| {
            if let Some(primary) = primary.upgrade() {
                primary.set_center(*center);
            }
        }));

        if let SyncState::Waiting { mut stationary } =
            std::mem::replace(&mut self.state, SyncState::Bridging { center })
        {
            stationary.remove();
        }
        tracing::info!(center = %secondary.center(), "secondary view settled, mirroring center");
    }

    fn dispose(&mut self) {
        match std::mem::replace(&mut self.state, SyncState::Disposed) {
            SyncState::Waiting {
                stationary: mut handle,
            }
            | SyncState::Bridging { center: mut handle } => {
                handle.remove();
                tracing::info!("view synchronizer disposed");
            }
            SyncState::Disposed => {}
        }
    }
}

/// Mirrors the secondary view's center onto the primary view once the
/// secondary has settled
///
/// Holds only weak references to the views. Dropping the synchronizer
/// disposes it.
pub struct ViewSynchronizer {
    link: Rc<RefCell<Link>>,
}

impl ViewSynchronizer {
    pub fn new(primary: &Rc<dyn View>, secondary: &Rc<dyn View>) -> Self {
        let link = Rc::new_cyclic(|weak: &Weak<RefCell<Link>>| {
            let weak = weak.clone();
            let stationary =
                secondary.watch_stationary(Box::new(move |stationary: &bool, _: &bool| {
                    if *stationary {
                        Link::on_stationary(&weak);
                    }
                }));
            RefCell::new(Link {
                primary: Rc::downgrade(primary),
                secondary: Rc::downgrade(secondary),
                state: SyncState::Waiting { stationary },
            })
        });

        if secondary.is_stationary() {
            link.borrow_mut().bridge();
        }

        Self { link }
    }

    pub fn phase(&self) -> SyncPhase {
        self.link.borrow().state.phase()
    }

    /// Release whichever watch is active. Later calls do nothing.
    pub fn dispose(&self) {
        self.link.borrow_mut().dispose();
    }
}

impl Drop for ViewSynchronizer {
    fn drop(&mut self) {
        match self.link.try_borrow_mut() {
            Ok(mut link) => link.dispose(),
            Err(_) => tracing::warn!("view synchronizer dropped while link is busy, watch left active"),
        }
    }
}
