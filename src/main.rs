#[cfg(not(feature = "streaming"))]
fn main() {
    eprintln!(
        "The keytone CLI requires the \"streaming\" feature. Rebuild with `--features streaming` to enable playback."
    );
}

#[cfg(feature = "streaming")]
mod cli {
    use std::env;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    use anyhow::Context;
    use signal_hook::consts::{SIGINT, SIGTERM};

    use keytone::streaming::DEFAULT_SAMPLE_RATE;
    use keytone::{
        lookup, AudioDevice, ElementQueue, EventReader, RenderState, StreamConfig, Timing,
        WaveTable,
    };

    fn usage(program: &str) -> ! {
        eprintln!("Usage: {program} <INPUT_DEVICE> <FREQ_HZ>");
        eprintln!();
        eprintln!("  INPUT_DEVICE   keyboard event device, e.g. /dev/input/event3");
        eprintln!("  FREQ_HZ        sidetone frequency in Hz, e.g. 600");
        std::process::exit(1);
    }

    pub fn run() -> anyhow::Result<()> {
        let args: Vec<String> = env::args().collect();
        let program = args.first().map(String::as_str).unwrap_or("keytone");
        if args.len() != 3 {
            usage(program);
        }
        let device_path = args[1].clone();
        let frequency: f32 = match args[2].parse() {
            Ok(freq) if freq > 0.0 => freq,
            _ => usage(program),
        };

        // Cancellation token, set by signal delivery, polled by the event
        // loop between reads. The render thread never sees it.
        let shutdown = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(SIGINT, Arc::clone(&shutdown))
            .context("installing SIGINT handler")?;
        signal_hook::flag::register(SIGTERM, Arc::clone(&shutdown))
            .context("installing SIGTERM handler")?;

        let config = StreamConfig::new(DEFAULT_SAMPLE_RATE);
        let timing = Timing::standard(config.sample_rate);
        config.validate(&timing).context("stream configuration")?;

        let queue = Arc::new(ElementQueue::new());
        let table = WaveTable::new(frequency, config.sample_rate, timing.dah() as usize);
        let state = RenderState::new(Arc::clone(&queue), table, timing, &config);
        let stats = state.stats();

        let mut reader = EventReader::open(&device_path, Arc::clone(&shutdown))
            .context("opening input device")?;
        let device = AudioDevice::new(&config, state).context("initializing audio output")?;

        println!("keytone - keyboard Morse code keyer");
        println!("===================================\n");
        println!("Input device: {device_path}");
        println!("Tone:         {frequency} Hz");
        println!("Sample rate:  {} Hz", config.sample_rate);
        println!(
            "Buffer size:  {} frames ({:.1}ms latency)",
            config.frames_per_buffer,
            config.latency_ms()
        );
        println!("\nKeying on A-Z, space inserts a word gap. Ctrl-C to quit.\n");

        let key_queue = Arc::clone(&queue);
        let result = reader.run(|event| {
            // Only initial key-down transitions of mapped keys produce
            // output; everything else is a no-op.
            let Some(key) = event.key() else { return };
            let Some(symbol) = lookup(key.symbol()) else { return };
            if key_queue.push_symbol(symbol) == 0 {
                eprintln!("element queue full, dropping '{}'", key.symbol());
            }
        });

        // Teardown always completes; failures past this point are
        // diagnostics, not errors.
        device.finish();
        drop(device);

        let snapshot = stats.lock().clone();
        println!("\n=== Keying Statistics ===");
        println!("Samples rendered: {}", snapshot.samples_rendered);
        println!("Elements played:  {}", snapshot.elements_played);

        // A read failure (as opposed to cancellation) shuts the whole
        // process down with a diagnostic and a non-zero exit.
        result.context("reading input events")?;

        println!("\nShutdown complete");
        Ok(())
    }
}

#[cfg(feature = "streaming")]
fn main() -> anyhow::Result<()> {
    cli::run()
}
