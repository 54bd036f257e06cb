//! Sender capability and the decorator chain.
//!
//! # Data Flow
//! ```text
//! decorate(base, [A, B, C])
//!     → A.send (outermost, runs first)
//!         → B.send
//!             → C.send
//!                 → base.send (real I/O)
//!             ← C post-processing
//!         ← B post-processing
//!     ← A post-processing
//! ```
//!
//! # Design Decisions
//! - Every layer implements the same `Sender` trait
//! - Decorators wrap `Arc<dyn Sender>`, so any sender (base or decorated) composes
//! - Requests flow by `&mut`, letting layers add headers without cloning
//! - Decorated senders hold no per-call state and are safe to share across tasks

pub mod builder;
pub mod chain;
pub mod headers;
pub mod sender;

pub use builder::build_sender;
pub use chain::{decorate, Decorator, Pipeline};
pub use headers::{authorization, header, request_id, try_header, HeaderSender, RequestIdSender};
pub use sender::{sender_fn, BoxSender, SendFuture, Sender, SenderFn};
