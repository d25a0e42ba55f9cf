pub mod editor;
pub mod sidebar;
