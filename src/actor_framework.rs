use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};

use thiserror::Error;

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with hooks, DTOs, and actions)
// =============================================================================

/// Errors raised by the actor plumbing itself, independent of any domain.
///
/// Domain error enums convert from this (`#[from] FrameworkError`) so that
/// clients can surface a single error type per aggregate.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("actor channel closed")]
    ChannelClosed,
    #[error("actor returned an unexpected action result")]
    UnexpectedResult,
}

/// Trait that any domain entity must implement to be managed by a
/// [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;

    // --- Custom actions ---
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    /// Domain error for this entity. Must absorb framework errors so the
    /// client can return one error type.
    type Error: Debug + Clone + Send + Sync + From<FrameworkError>;

    fn id(&self) -> &Self::Id;

    /// Construct the full entity from an id and creation parameters.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle hooks ---

    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;

    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action handler ---

    /// Handle a domain-specific action against the live entity. The actor
    /// processes one message at a time, so a check-then-mutate sequence inside
    /// a single action is atomic with respect to other requests.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id, T::Error>,
    },
    /// Create-if-absent under a caller-supplied id, then return the entity.
    /// Used for aggregates keyed by their owner (one cart per user).
    Ensure {
        id: T::Id,
        params: T::CreateParams,
        respond_to: Response<T, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient { sender };
        (actor, client)
    }

    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let id = (self.next_id_fn)();
                    match T::from_create_params(id.clone(), params) {
                        Ok(item) => {
                            self.store.insert(id.clone(), item);
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                ResourceRequest::Ensure { id, params, respond_to } => {
                    if let Some(item) = self.store.get(&id) {
                        let _ = respond_to.send(Ok(item.clone()));
                        continue;
                    }
                    match T::from_create_params(id.clone(), params) {
                        Ok(item) => {
                            self.store.insert(id, item.clone());
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(patch) {
                            let _ = respond_to.send(Err(e));
                            continue;
                        }
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        let _ =
                            respond_to.send(Err(FrameworkError::NotFound(id.to_string()).into()));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete() {
                            let _ = respond_to.send(Err(e));
                            continue;
                        }
                        self.store.remove(&id);
                        let _ = respond_to.send(Ok(()));
                    } else {
                        let _ =
                            respond_to.send(Err(FrameworkError::NotFound(id.to_string()).into()));
                    }
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item.handle_action(action);
                        let _ = respond_to.send(result);
                    } else {
                        let _ =
                            respond_to.send(Err(FrameworkError::NotFound(id.to_string()).into()));
                    }
                }
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    /// Build a client from a raw sender. Used by the mock framework to
    /// intercept requests in tests.
    #[cfg(test)]
    pub fn from_sender(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        msg: ResourceRequest<T>,
        response: oneshot::Receiver<Result<R, T::Error>>,
    ) -> Result<R, T::Error> {
        self.sender
            .send(msg)
            .await
            .map_err(|_| T::Error::from(FrameworkError::ChannelClosed))?;
        response
            .await
            .map_err(|_| T::Error::from(FrameworkError::ChannelClosed))?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Create { params, respond_to }, response)
            .await
    }

    pub async fn ensure(&self, id: T::Id, params: T::CreateParams) -> Result<T, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Ensure { id, params, respond_to }, response)
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Get { id, respond_to }, response)
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Update { id, patch, respond_to }, response)
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Delete { id, respond_to }, response)
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.request(ResourceRequest::Action { id, action, respond_to }, response)
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
