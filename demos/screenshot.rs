#[cfg(target_os = "windows")]
fn main() {
    use bmpshot::{Screens, ShotError};
    use std::{env, process, time::Instant};

    let mut args = env::args().skip(1);
    let index = args
        .next()
        .map(|arg| arg.parse::<usize>().unwrap())
        .unwrap_or(0);
    let path = args.next().unwrap_or_else(|| format!("screen-{}.bmp", index));

    let screens = Screens::gdi();
    let monitor = match screens.describe(index) {
        Ok(monitor) => monitor,
        Err(ShotError::InvalidScreenIndex { available, .. }) => {
            eprintln!("No screen {}. Pick one of {:?}", index, available);
            process::exit(1);
        }
        Err(err) => panic!("{}", err),
    };

    let start = Instant::now();
    screens.capture_to_file(&monitor, &path).unwrap();
    println!(
        "saved {} ({}x{}) to {} in {:?}",
        monitor.device_name(),
        monitor.width(),
        monitor.height(),
        path,
        start.elapsed()
    );
}

#[cfg(not(target_os = "windows"))]
fn main() {
    eprintln!("GDI screen capture is only available on Windows");
}
