pub mod cpu_frame_preparer;
