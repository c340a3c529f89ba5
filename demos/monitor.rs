#[cfg(target_os = "windows")]
fn main() {
    use bmpshot::Screens;
    use std::time::Instant;

    let start = Instant::now();
    let registry = Screens::gdi().registry().unwrap();
    println!("MonitorRegistry::build() took {:?}", start.elapsed());

    for monitor in &registry {
        println!(
            "Monitor {}: {} {:?} work area {:?} primary={}",
            monitor.index(),
            monitor.device_name(),
            (monitor.x(), monitor.y(), monitor.width(), monitor.height()),
            monitor.work_area(),
            monitor.is_primary()
        );
    }

    if let Some(monitor) = registry.from_point(100, 100) {
        println!("monitor at (100, 100): {}", monitor.device_name());
    }
}

#[cfg(not(target_os = "windows"))]
fn main() {
    eprintln!("GDI monitor enumeration is only available on Windows");
}
