// Pipeline processing: career selection and row flattening

pub mod career;
pub mod flatten;

pub use career::{select_all_time, select_career};
pub use flatten::{flatten, render_cell, split_name, FlatPlayerRow};
