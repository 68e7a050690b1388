//! Eviction policies.
//!
//! | Policy             | Victim on overflow                                 |
//! |--------------------|----------------------------------------------------|
//! | [`basic`]          | none; the store is unbounded                       |
//! | [`fifo`]           | earliest inserted key                              |
//! | [`lifo`]           | key put just before the newcomer                   |
//! | [`mru`]            | most recently used key other than the newcomer     |
//! | [`lfu`]            | least frequently used, least recently used on ties |

pub mod basic;
pub mod fifo;
pub mod lfu;
pub mod lifo;
pub mod mru;
