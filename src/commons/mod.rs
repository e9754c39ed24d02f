//! Small standalone helpers: numeric utilities, a dynamically typed value,
//! runtime type checks and delayed or sequential thread runners.

mod dynamic;
mod numeric;
mod reflect;
mod threads;

pub use dynamic::Dynamic;
pub use numeric::{all, any, max, min, range, safe_int};
pub use reflect::{cast_slice, for_each_as, is_primitive, type_name_of};
pub use threads::{do_after, do_after_detached, do_successively, do_successively_detached, Action};
