pub mod zoom_viewer;
