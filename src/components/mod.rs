pub mod dropdown;
pub mod name_dialog;
