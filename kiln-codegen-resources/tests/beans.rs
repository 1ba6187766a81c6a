//! Two beans through extraction, rendering and the idempotent writer.

use std::fs;

use kiln_codegen::{
    GenerationPass, GoalStatus, extract::markers, incremental::InputSet, testing::TestProject,
};
use kiln_codegen_resources::BeanGoal;
use kiln_core::OutputRoot;
use kiln_index::{SymbolIndex, SymbolRecord};

const BAR: &str = "META-INF/services/org/apache/camel/bean/bar.json";
const FOO: &str = "META-INF/services/org/apache/camel/bean/Foo.json";
const LISTING: &str = "META-INF/services/org/apache/camel/bean.properties";

fn index() -> SymbolIndex {
    SymbolIndex::builder()
        .record(SymbolRecord::on_class("org.acme.Foo", markers::BEAN).attr("name", "Foo"))
        .record(SymbolRecord::on_class("org.acme.Bar", markers::BEAN).attr("name", "bar"))
        .build()
}

#[test]
fn test_two_beans_are_created_then_unchanged() {
    let project = TestProject::new().unwrap();
    let pass = GenerationPass::new().goal(BeanGoal::default());

    let first = pass.run(&index(), project.ctx(), &project.writer()).unwrap();
    let goal = first.goal("bean").unwrap();
    assert_eq!(goal.status, GoalStatus::Generated);
    assert_eq!(goal.summary.created.len(), 3);
    assert_eq!(project.notifier().len(), 3);

    insta::assert_snapshot!(project.read(OutputRoot::Resources, LISTING).unwrap(), @r###"
# Generated by kiln build tools - do NOT edit this file!
bean=bar Foo
groupId=org.acme
artifactId=camel-foo
version=1.0.0
projectName=Camel :: Foo
projectDescription=Foo support
"###);
    insta::assert_snapshot!(project.read(OutputRoot::Resources, BAR).unwrap(), @r###"
{
  "bean": {
    "kind": "bean",
    "name": "bar",
    "javaType": "org.acme.Bar",
    "title": "Bar",
    "description": "",
    "deprecated": false,
    "groupId": "org.acme",
    "artifactId": "camel-foo",
    "version": "1.0.0"
  }
}
"###);
    assert!(project.read(OutputRoot::Resources, FOO).is_some());

    let modified: Vec<_> = [BAR, FOO, LISTING]
        .iter()
        .map(|p| {
            fs::metadata(project.output(OutputRoot::Resources, p))
                .unwrap()
                .modified()
                .unwrap()
        })
        .collect();

    let second = pass.run(&index(), project.ctx(), &project.writer()).unwrap();
    let goal = second.goal("bean").unwrap();
    assert_eq!(goal.status, GoalStatus::Generated);
    assert_eq!(goal.summary.changed(), 0);
    assert_eq!(goal.summary.unchanged.len(), 3);
    assert_eq!(project.notifier().len(), 3);

    let after: Vec<_> = [BAR, FOO, LISTING]
        .iter()
        .map(|p| {
            fs::metadata(project.output(OutputRoot::Resources, p))
                .unwrap()
                .modified()
                .unwrap()
        })
        .collect();
    assert_eq!(modified, after);
}

#[test]
fn test_duplicate_bean_names_fail_the_goal() {
    let project = TestProject::new().unwrap();
    let index = SymbolIndex::builder()
        .record(SymbolRecord::on_class("org.acme.A", markers::BEAN).attr("name", "same"))
        .record(SymbolRecord::on_class("org.acme.B", markers::BEAN).attr("name", "same"))
        .build();
    let report = GenerationPass::new()
        .goal(BeanGoal::default())
        .run(&index, project.ctx(), &project.writer())
        .unwrap();
    assert_eq!(report.goal("bean").unwrap().status, GoalStatus::Failed);
    assert!(report.has_errors());
    assert!(project.read(OutputRoot::Resources, LISTING).is_none());
}

#[test]
fn test_changed_bean_is_updated() {
    let project = TestProject::new().unwrap();
    let pass = GenerationPass::new().goal(BeanGoal::default());
    pass.run(&index(), project.ctx(), &project.writer()).unwrap();

    let changed = SymbolIndex::builder()
        .record(
            SymbolRecord::on_class("org.acme.Foo", markers::BEAN)
                .attr("name", "Foo")
                .attr("description", "Now described"),
        )
        .record(SymbolRecord::on_class("org.acme.Bar", markers::BEAN).attr("name", "bar"))
        .build();
    let report = pass.run(&changed, project.ctx(), &project.writer()).unwrap();
    let summary = &report.goal("bean").unwrap().summary;
    assert_eq!(summary.updated.len(), 1);
    assert_eq!(summary.unchanged.len(), 2);
    assert!(
        project
            .read(OutputRoot::Resources, FOO)
            .unwrap()
            .contains("\"description\": \"Now described\",")
    );
}

#[test]
fn test_renamed_project_regenerates_listing() {
    let project = TestProject::new().unwrap();
    let pass = GenerationPass::new()
        .goal(BeanGoal::default())
        .tracker(InputSet::new(), project.cache_dir());
    pass.run(&index(), project.ctx(), &project.writer()).unwrap();

    let mut renamed = project.ctx().clone();
    renamed.project.name = Some("Camel :: Renamed".to_string());
    let report = pass.run(&index(), &renamed, &project.writer()).unwrap();

    let goal = report.goal("bean").unwrap();
    assert_eq!(goal.status, GoalStatus::Generated);
    assert_eq!(goal.summary.updated.len(), 1);
    assert!(
        project
            .read(OutputRoot::Resources, LISTING)
            .unwrap()
            .contains("\nprojectName=Camel :: Renamed\n")
    );
}
