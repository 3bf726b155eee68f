pub mod color;
pub mod mask;
pub mod mask_filter;
pub mod pipeline;
pub mod region_grow;
pub mod replace_masked;
pub(crate) mod summed_area_table;
