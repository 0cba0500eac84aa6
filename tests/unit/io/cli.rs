//! Tests for command-line parsing and the replay pipeline

#[cfg(test)]
mod tests {
    use clap::Parser;
    use goinfluence::InfluenceError;
    use goinfluence::io::cli::{Cli, ReplayProcessor};
    use goinfluence::io::configuration::{
        DEFAULT_CELL_SIZE, DEFAULT_FPS, DEFAULT_OVERLAY_ALPHA, DEFAULT_VIDEO,
    };
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const GAME: &str = "(;GM[1]SZ[9];B[ee];W[cc];B[];W[gg])";

    fn cli_for(record: &Path, frames_dir: &Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "program".to_string(),
            record.display().to_string(),
            "--frames-dir".to_string(),
            frames_dir.display().to_string(),
            "--no-video".to_string(),
            "--quiet".to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));
        Cli::parse_from(args)
    }

    // Tests CLI parsing with only the record argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "game.sgf"]);

        assert_eq!(cli.record, PathBuf::from("game.sgf"));
        assert_eq!(cli.output, None);
        assert_eq!(cli.cell_size, DEFAULT_CELL_SIZE);
        assert_eq!(cli.video, PathBuf::from(DEFAULT_VIDEO));
        assert_eq!(cli.fps, DEFAULT_FPS);
        assert_eq!(cli.alpha, DEFAULT_OVERLAY_ALPHA);
        assert!(cli.should_encode_video());
        assert!(cli.should_show_progress());
    }

    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "game.sgf",
            "final.png",
            "--cell-size",
            "12",
            "--video",
            "out/movie.mp4",
            "--fps",
            "4",
            "--alpha",
            "128",
            "--frames-dir",
            "frames",
            "--no-video",
            "-q",
        ]);

        assert_eq!(cli.output, Some(PathBuf::from("final.png")));
        assert_eq!(cli.cell_size, 12);
        assert_eq!(cli.video, PathBuf::from("out/movie.mp4"));
        assert_eq!(cli.fps, 4);
        assert_eq!(cli.alpha, 128);
        assert_eq!(cli.frames_dir_path(), PathBuf::from("frames"));
        assert!(!cli.should_encode_video());
        assert!(!cli.should_show_progress());
    }

    #[test]
    fn test_default_paths_follow_record_stem() {
        let cli = Cli::parse_from(["program", "games/first.sgf"]);

        assert_eq!(cli.output_path(), PathBuf::from("games/first_influence.png"));
        assert_eq!(cli.frames_dir_path(), PathBuf::from("first_frames"));
    }

    #[test]
    fn test_process_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let cli = cli_for(
            &temp_dir.path().join("missing.sgf"),
            &temp_dir.path().join("frames"),
            &[],
        );

        let result = ReplayProcessor::new(cli).process();

        match result {
            Err(error @ InfluenceError::RecordLoad { .. }) => {
                assert!(error.to_string().contains("missing.sgf"));
            }
            other => unreachable!("Expected RecordLoad, got {other:?}"),
        }
    }

    #[test]
    fn test_process_malformed_record() {
        let temp_dir = TempDir::new().unwrap();
        let record = temp_dir.path().join("broken.sgf");
        fs::write(&record, "(;SZ[9];B[ee]").unwrap();

        let cli = cli_for(&record, &temp_dir.path().join("frames"), &[]);
        let result = ReplayProcessor::new(cli).process();

        assert!(matches!(result, Err(InfluenceError::RecordParse { .. })));
    }

    // Tests one numbered frame per move plus the final snapshot
    // Verified by skipping frames for passes
    #[test]
    fn test_process_writes_frames_and_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let record = temp_dir.path().join("game.sgf");
        let frames_dir = temp_dir.path().join("frames");
        fs::write(&record, GAME).unwrap();

        let cli = cli_for(&record, &frames_dir, &["--cell-size", "10"]);
        let summary = ReplayProcessor::new(cli).process().unwrap();

        assert_eq!(summary.frames, 4);
        assert_eq!(summary.video, None);
        for name in ["0001.png", "0002.png", "0003.png", "0004.png"] {
            assert!(frames_dir.join(name).exists(), "missing frame {name}");
        }
        assert!(!frames_dir.join("0005.png").exists());

        assert_eq!(summary.snapshot, temp_dir.path().join("game_influence.png"));
        let snapshot = image::open(&summary.snapshot).unwrap();
        assert_eq!(snapshot.width(), 100);
        assert_eq!(snapshot.height(), 100);
    }

    #[test]
    fn test_process_clears_stale_frames_only() {
        let temp_dir = TempDir::new().unwrap();
        let record = temp_dir.path().join("game.sgf");
        let frames_dir = temp_dir.path().join("frames");
        fs::write(&record, GAME).unwrap();
        fs::create_dir_all(&frames_dir).unwrap();
        fs::write(frames_dir.join("0009.png"), "stale").unwrap();
        fs::write(frames_dir.join("notes.txt"), "keep").unwrap();

        let cli = cli_for(&record, &frames_dir, &["--cell-size", "10"]);
        ReplayProcessor::new(cli).process().unwrap();

        assert!(!frames_dir.join("0009.png").exists());
        assert!(frames_dir.join("notes.txt").exists());
    }

    #[test]
    fn test_process_record_without_moves() {
        let temp_dir = TempDir::new().unwrap();
        let record = temp_dir.path().join("setup.sgf");
        let output = temp_dir.path().join("out").join("final.png");
        fs::write(&record, "(;SZ[5]AB[cc])").unwrap();

        let mut args = vec![
            "program".to_string(),
            record.display().to_string(),
            output.display().to_string(),
            "--frames-dir".to_string(),
            temp_dir.path().join("frames").display().to_string(),
            "--quiet".to_string(),
        ];
        args.extend(["--cell-size".to_string(), "10".to_string()]);
        let summary = ReplayProcessor::new(Cli::parse_from(args)).process().unwrap();

        assert_eq!(summary.frames, 0);
        assert_eq!(summary.video, None);
        assert!(output.exists());
    }

    // Tests the alpha flag reaches the rendered influence squares
    // Verified by ignoring the flag when building the layout
    #[test]
    fn test_process_applies_overlay_alpha() {
        let temp_dir = TempDir::new().unwrap();
        let record = temp_dir.path().join("corner.sgf");
        fs::write(&record, "(;SZ[3];B[cc])").unwrap();

        let cli = cli_for(
            &record,
            &temp_dir.path().join("frames"),
            &["--cell-size", "10", "--alpha", "128"],
        );
        let summary = ReplayProcessor::new(cli).process().unwrap();

        let snapshot = image::open(&summary.snapshot).unwrap().to_rgba8();
        assert_eq!(snapshot.get_pixel(26, 26).0, [0, 128, 0, 255]);
    }

    #[test]
    fn test_process_rejects_huge_cell_size() {
        let temp_dir = TempDir::new().unwrap();
        let record = temp_dir.path().join("game.sgf");
        fs::write(&record, GAME).unwrap();

        let cli = cli_for(
            &record,
            &temp_dir.path().join("frames"),
            &["--cell-size", "300000000"],
        );
        let result = ReplayProcessor::new(cli).process();

        assert!(matches!(
            result,
            Err(InfluenceError::InvalidParameter {
                parameter: "cell_size",
                ..
            })
        ));
        assert!(!temp_dir.path().join("frames").exists());
    }

    #[test]
    fn test_process_rejects_tiny_cell_size() {
        let temp_dir = TempDir::new().unwrap();
        let record = temp_dir.path().join("game.sgf");
        fs::write(&record, GAME).unwrap();

        let cli = cli_for(&record, &temp_dir.path().join("frames"), &["--cell-size", "1"]);
        let result = ReplayProcessor::new(cli).process();

        assert!(matches!(
            result,
            Err(InfluenceError::InvalidParameter {
                parameter: "cell_size",
                ..
            })
        ));
    }
}
