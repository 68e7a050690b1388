pub mod frequency_buckets;
pub mod intrusive_list;
pub mod key_order;
pub mod slot_arena;

pub use frequency_buckets::{FrequencyBuckets, DEFAULT_BUCKET_PREALLOC};
pub use intrusive_list::IntrusiveList;
pub use key_order::KeyOrder;
pub use slot_arena::{SlotArena, SlotId};
