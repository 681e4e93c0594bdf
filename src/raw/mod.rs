mod arena;
mod check;
mod handle;
mod node;
mod query;
mod raw_llrb_map;

pub(crate) use query::Stack;
pub(crate) use raw_llrb_map::RawLlrbMap;
