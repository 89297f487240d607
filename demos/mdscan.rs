use std::collections::BTreeMap;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

use mdreader::{ReadOptions, Registry, Release, Track};

struct AppArgs {
    unprocessed: bool,
    root: PathBuf,
}

fn cli_parser() -> bpaf::OptionParser<AppArgs> {
    let unprocessed = bpaf::long("unprocessed")
        .short('u')
        .help("Also print tags without a canonical mapping")
        .switch();
    let root = bpaf::positional::<PathBuf>("root").help("Directory path to scan");
    bpaf::Parser::to_options(bpaf::construct!(AppArgs { unprocessed, root }))
}

fn describe(track: &Track) -> String {
    format!(
        "{} {:?}, {} ms, {} Hz, {} ch, {} kbps",
        track.position,
        track.title,
        track.duration,
        track.audio.sample_rate,
        track.audio.channels,
        track.audio.avg_bitrate
    )
}

fn main() {
    let args = cli_parser().run();
    let registry = Registry::new(
        ReadOptions::new()
            .decode_pictures(false)
            .keep_unprocessed(args.unprocessed),
    );

    // Files are grouped into one release per directory.
    let mut releases: BTreeMap<PathBuf, (Release, Vec<Track>)> = BTreeMap::new();
    for dent in walkdir::WalkDir::new(&args.root)
        .same_file_system(true)
        .sort_by_file_name()
        .into_iter()
        // Ignore hidden files, don't recurse into hidden directories
        .filter_entry(|dent| !dent.file_name().as_bytes().starts_with(b"."))
    {
        let Ok(dent) = dent else { continue };
        if !dent.file_type().is_file() {
            continue;
        }
        let path = dent.into_path();
        let dir = path.parent().map(PathBuf::from).unwrap_or_default();
        let (release, tracks) = releases.entry(dir).or_default();
        match registry.read_path(&path, release) {
            Ok(Some(track)) => tracks.push(track),
            Ok(None) => {}
            Err(err) => println!("{}: error {}", path.display(), err),
        }
    }

    for (dir, (release, tracks)) in releases {
        if tracks.is_empty() {
            continue;
        }
        println!(
            "{}: {:?} ({}), {} discs, {} tracks",
            dir.display(),
            release.title,
            release.year,
            release.discs.len(),
            tracks.len()
        );
        for track in &tracks {
            println!("  {}", describe(track));
            for (name, value) in &track.unprocessed {
                println!("    {} = {:?}", name, value);
            }
        }
    }
}
