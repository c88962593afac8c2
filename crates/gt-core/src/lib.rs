pub mod hit;
pub mod id;
pub mod layout;
pub mod model;
pub mod store;

pub use hit::{Surface, cells_in_rect, hit_test, hit_test_rect};
pub use id::{ItemId, RowId};
pub use layout::{Viewport, VisibleRow, item_bounds, resolve_visible_rows, row_at};
pub use model::*;
pub use store::{Mutation, Store, SubscriptionId, Topic, Transaction};
