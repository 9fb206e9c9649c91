//! Persistent (immutable) data structures.
//!
//! - [`PersistentList`]: Persistent singly-linked list
//!
//! Every operation returns a new value and shares unchanged structure with
//! its input.
//!
//! # Examples
//!
//! ```rust
//! use cons_stream::persistent::PersistentList;
//!
//! let list = PersistentList::new().cons(3).cons(2).cons(1);
//! assert_eq!(list.head(), Some(&1));
//!
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);
//! assert_eq!(extended.len(), 4);
//! ```

mod list;

pub use list::{PersistentList, PersistentListIntoIterator, PersistentListIterator};
