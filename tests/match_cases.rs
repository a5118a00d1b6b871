use assert_fs::TempDir;
use baseline_diff::{BaselineOptions, CaseContext, DiffFormatOptions, Mismatch, run};
use common::file::{age, create_directory, read, write, write_generated_lines};
use common::{expect_mismatch, fixture_dir};
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

async fn write_and_match(context: CaseContext, files: &[(&str, &str)]) -> anyhow::Result<()> {
    for (relative, content) in files {
        let path = context.result_path().join(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await?;
    }
    context.match_baseline(None).await?;
    Ok(())
}

fn directory_case(fixture_dir: &TempDir, name: &str, baseline: &[(&str, &str)]) {
    create_directory(&fixture_dir.path().join("cases").join(name));
    for (relative, content) in baseline {
        write(fixture_dir.path(), &format!("baselines/{name}/{relative}"), content);
    }
}

#[rstest]
#[tokio::test]
async fn equal_trees_match(fixture_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let files = [("a.txt", "a\nb\n"), ("nested/c.txt", "c")];
    directory_case(&fixture_dir, "case", &files);

    let report = run(fixture_dir.path(), |context| write_and_match(context, &files)).await?;

    report.into_result()?;

    Ok(())
}

#[rstest]
#[tokio::test]
async fn one_changed_file_is_exactly_one_mismatch(
    fixture_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    directory_case(&fixture_dir, "case", &[("same.txt", "same"), ("x.txt", "a\nb")]);

    let report = run(fixture_dir.path(), |context| {
        write_and_match(context, &[("same.txt", "same"), ("x.txt", "a\nc")])
    })
    .await?;

    let mismatch = expect_mismatch(&report.outcomes[0]);
    assert_eq!(mismatch.items().len(), 1);
    let root = fixture_dir.path();
    assert_eq!(
        mismatch.items()[0],
        Mismatch::mismatch_file(
            &root.join("results/case/x.txt"),
            "a\nc".to_string(),
            &root.join("baselines/case/x.txt"),
            "a\nb".to_string(),
            &DiffFormatOptions::default(),
        )
    );
    assert_eq!(
        mismatch.to_string(),
        format!(
            "Mismatch detected: \nFile '{}' does not match with '{}'.\n\n- baseline\n+ result\n  a\n- b\n+ c",
            root.join("results/case/x.txt").display(),
            root.join("baselines/case/x.txt").display()
        )
    );

    Ok(())
}

#[rstest]
#[tokio::test]
async fn result_only_file_is_one_extra_result_file(
    fixture_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    directory_case(&fixture_dir, "case", &[("a.txt", "a")]);

    let report = run(fixture_dir.path(), |context| {
        write_and_match(context, &[("a.txt", "a"), ("b.txt", "b")])
    })
    .await?;

    let items = expect_mismatch(&report.outcomes[0]).items();
    assert_eq!(items.len(), 1);
    assert!(matches!(
        &items[0],
        Mismatch::ExtraResultFile { path, .. } if path.ends_with("results/case/b.txt")
    ));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn baseline_only_file_is_one_missing_result_file(
    fixture_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    directory_case(&fixture_dir, "case", &[("a.txt", "a"), ("sub/b.txt", "b")]);

    let report = run(fixture_dir.path(), |context| {
        write_and_match(context, &[("a.txt", "a")])
    })
    .await?;

    let items = expect_mismatch(&report.outcomes[0]).items();
    assert_eq!(items.len(), 1);
    assert!(matches!(
        &items[0],
        Mismatch::MissingResultFile { path, baseline, .. }
            if path.ends_with("results/case/sub/b.txt") && baseline == "b"
    ));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn file_case_without_baseline_reports_every_output_file(
    fixture_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write(fixture_dir.path(), "cases/tool.cmd", "run");

    let report = run(fixture_dir.path(), |context| {
        write_and_match(context, &[("stdout", "out"), ("stderr", "err")])
    })
    .await?;

    let items = expect_mismatch(&report.outcomes[0]).items();
    assert_eq!(
        items.iter().map(Mismatch::summary).collect::<Vec<_>>(),
        vec![
            format!(
                "Extra result file '{}'.",
                fixture_dir.path().join("results/tool.cmd/stderr").display()
            ),
            format!(
                "Extra result file '{}'.",
                fixture_dir.path().join("results/tool.cmd/stdout").display()
            ),
        ]
    );

    Ok(())
}

#[rstest]
#[tokio::test]
async fn file_cases_sharing_the_results_root_ignore_each_others_leftovers(
    fixture_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write(fixture_dir.path(), "cases/out.txt", "");
    write(fixture_dir.path(), "baselines/out.txt", "fresh");
    let leftover = write(fixture_dir.path(), "results/leftover.txt", "untouched");
    age(&leftover);
    let stale_output = write(fixture_dir.path(), "results/gone.txt", "from an old run");
    age(&stale_output);

    let report = run(fixture_dir.path(), |context| async move {
        tokio::fs::write(context.result_path(), "fresh").await?;
        context.match_baseline(None).await?;
        // the whole root, not just this case
        context.match_baseline(Some("")).await?;
        anyhow::Ok(())
    })
    .await?;

    report.into_result()?;
    assert!(!leftover.exists());
    assert!(!stale_output.exists());

    Ok(())
}

#[rstest]
#[tokio::test]
async fn matching_twice_gives_the_same_answer(
    fixture_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    directory_case(&fixture_dir, "case", &[("a.txt", "1\n2\n3\n"), ("b.txt", "b")]);

    let report = run(fixture_dir.path(), |context| async move {
        tokio::fs::write(context.result_path().join("a.txt"), "1\n3\n").await?;
        let first = context.match_baseline(None).await.map_err(|e| e.to_string());
        let second = context.match_baseline(None).await.map_err(|e| e.to_string());
        anyhow::ensure!(first.is_err(), "expected a mismatch");
        anyhow::ensure!(first == second, "outcomes differ:\n{first:?}\n{second:?}");
        anyhow::Ok(())
    })
    .await?;

    report.into_result()?;

    Ok(())
}

#[rstest]
#[tokio::test]
async fn accepted_results_match_on_the_next_run(
    fixture_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    directory_case(&fixture_dir, "case", &[]);
    let files = [("a.txt", "a"), ("deep/b.txt", "b")];

    let first = run(fixture_dir.path(), |context| async move {
        for (relative, content) in files {
            write(context.result_path(), relative, content);
        }
        context.copy_to_baseline(None).await?;
        anyhow::Ok(())
    })
    .await?;
    first.into_result()?;

    let second = run(fixture_dir.path(), |context| write_and_match(context, &files)).await?;

    second.into_result()?;
    assert_eq!(read(&fixture_dir.path().join("baselines/case/deep/b.txt")), "b");

    Ok(())
}

#[rstest]
#[tokio::test]
async fn large_changed_file_is_windowed_in_the_failure(
    fixture_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    directory_case(&fixture_dir, "case", &[]);
    let mut lines =
        write_generated_lines(&fixture_dir.path().join("baselines/case"), "big.txt", 1000);
    lines[499] = "changed".to_string();
    let changed = lines.join("\n");

    let report = run(fixture_dir.path(), |context| {
        let changed = changed.clone();
        async move { write_and_match(context, &[("big.txt", changed.as_str())]).await }
    })
    .await?;

    let diff = expect_mismatch(&report.outcomes[0]).items()[0].diff().to_string();
    let lines = diff.lines().collect::<Vec<_>>();
    assert_eq!(lines.iter().filter(|l| l.trim() == "......").count(), 2);
    assert!(lines.contains(&"      + changed"));
    assert!(lines.iter().any(|l| l.starts_with(" 495:   494: ")));
    assert!(lines.iter().any(|l| l.starts_with(" 505:   504: ")));
    assert_eq!(lines.len(), 16);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn display_threshold_caps_the_failure_text(
    fixture_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    directory_case(&fixture_dir, "case", &[]);
    write_generated_lines(&fixture_dir.path().join("baselines/case"), "big.txt", 298);
    let options = BaselineOptions::from(fixture_dir.path()).with_diff(DiffFormatOptions {
        large_file_threshold: 1000,
        ..Default::default()
    });

    let report = run(options, |context| write_and_match(context, &[])).await?;

    let item = &expect_mismatch(&report.outcomes[0]).items()[0];
    assert!(matches!(item, Mismatch::MissingResultFile { .. }));
    let lines = item.diff().lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 151);
    assert!(lines[150].contains("150 more lines omitted"));

    Ok(())
}
