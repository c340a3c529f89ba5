#[cfg(target_os = "windows")]
fn main() {
    use bmpshot::{CaptureLoopOptions, Screens};
    use std::{env, thread, time::Duration};

    let index = env::args()
        .nth(1)
        .map(|arg| arg.parse::<usize>().unwrap())
        .unwrap_or(0);

    let screens = Screens::gdi();
    let monitor = screens.describe(index).unwrap();

    let mut capture_loop = screens
        .start_continuous_capture(
            &monitor,
            CaptureLoopOptions::default()
                .with_max_fps(30)
                .with_max_consecutive_failures(10),
        )
        .unwrap();

    for _ in 0..10 {
        let frame = capture_loop.get_latest().unwrap();
        println!(
            "frame {}: {}x{}",
            capture_loop.frame_count().unwrap(),
            frame.width(),
            frame.height()
        );
        thread::sleep(Duration::from_millis(200));
    }

    std::fs::write("latest.bmp", capture_loop.get_latest_bitmap().unwrap()).unwrap();
    capture_loop.stop().unwrap();
    println!("stopped, last error: {:?}", capture_loop.last_error().unwrap());
}

#[cfg(not(target_os = "windows"))]
fn main() {
    eprintln!("GDI screen capture is only available on Windows");
}
