use crate::document::DocumentType;

pub const CONSTITUTION: &str = r#"# CONSTITUTION

## PRINCIPLES

<!-- TODO: define core principles that guide all decisions -->

## CONSTRAINTS

<!-- TODO: define invariant rules that must never be violated -->

## CHANGE CLASSIFICATION

<!-- classify work before acting -->

### Spec-Driven

<!-- new features and substantial behavioral changes: SPEC.md -> PLAN.md -> TASKS.md -> implement -> reflect -->

### Ad Hoc

<!-- fixes, refactors, dependency updates: understand -> implement -> verify -->

## NON-GOALS

<!-- TODO: define what this project explicitly will not do -->

## DEFINITIONS

<!-- TODO: define key terms used throughout the project -->
"#;

pub const SPEC: &str = r#"# SPEC

## SUMMARY

<!-- TODO: 1-2 sentence business summary of this feature -->

## PROBLEM

<!-- TODO: describe the problem being solved -->

## GOALS

<!-- TODO: list what this feature must achieve -->

## NON-GOALS

<!-- TODO: list what this feature will not do -->

## USERS

<!-- TODO: identify who will use this feature -->

## REQUIREMENTS

<!-- TODO: list functional requirements -->

## ACCEPTANCE

<!-- TODO: define acceptance criteria -->

## EDGE-CASES

<!-- TODO: document edge cases and how they should be handled -->

## OPEN-QUESTIONS

<!-- TODO: list unresolved questions -->
"#;

pub const PLAN: &str = r#"# PLAN

## SUMMARY

<!-- TODO: brief overview of the implementation approach -->

## APPROACH

<!-- TODO: explain the strategy, not code -->

## COMPONENTS

<!-- TODO: list major components and their responsibilities -->

## DATA

<!-- TODO: describe data structures and storage -->

## INTERFACES

<!-- TODO: define APIs, contracts, and integration points -->

## RISKS

<!-- TODO: identify risks and mitigation strategies -->

## TESTING

<!-- TODO: describe testing strategy -->
"#;

/// Task tracking uses `- [ ]` / `- [x]` checkboxes. The template ships with
/// none so a fresh TASKS.md sits in the `tasks` phase until tasks are listed.
pub const TASKS: &str = r#"# TASKS

## PROGRESS TABLE

| ID | TASK | STATUS | OWNER | DEPENDENCIES |
| -- | ---- | ------ | ----- | ------------ |

## TASKS

<!-- TODO: list tasks as markdown checkboxes, e.g. "- T001: write the parser" prefixed with "[ ]" -->

## TASK DETAILS

<!-- per task: GOAL, SCOPE, ACCEPTANCE, NOTES -->

## DEPENDENCIES

<!-- TODO: document task dependencies and ordering -->

## NOTES

<!-- TODO: additional context or implementation notes -->
"#;

pub const ANALYSIS: &str = r#"# ANALYSIS

## UNDERSTANDING

**Current Understanding: 0%**

## QUESTIONS

<!-- TODO: open questions for the user/team -->

## RESEARCH

<!-- technical investigation notes -->

## CLARIFICATIONS

<!-- resolved questions with answers -->

## ASSUMPTIONS

<!-- documented assumptions made during analysis -->

## RISKS

<!-- identified risks or concerns -->
"#;

pub const PROJECT_PROGRESS_SUMMARY: &str = r#"# PROJECT PROGRESS SUMMARY

## FEATURE PROGRESS TABLE

| ID | FEATURE | PATH | PHASE | CREATED | SUMMARY |
| -- | ------- | ---- | ----- | ------- | ------- |

## PROJECT INTENT

<!-- TODO: describe the overall project purpose -->

## GLOBAL CONSTRAINTS

<!-- TODO: summarize key constraints from CONSTITUTION.md -->

## FEATURE SUMMARIES

## LAST UPDATED
"#;

/// Default markdown for a new document of `doc_type`.
pub fn for_type(doc_type: DocumentType) -> &'static str {
    match doc_type {
        DocumentType::Constitution => CONSTITUTION,
        DocumentType::Spec => SPEC,
        DocumentType::Plan => PLAN,
        DocumentType::Tasks => TASKS,
        DocumentType::Analysis => ANALYSIS,
        DocumentType::ProjectProgressSummary => PROJECT_PROGRESS_SUMMARY,
    }
}

/// Short pointer file (AGENTS.md, CLAUDE.md, ...) directing an agent at the
/// constitution and the specs directory.
pub fn agent_pointer(agent_name: &str, constitution_path: &str, specs_dir: &str) -> String {
    format!(
        "# {agent_name}

## Source of truth

- Workflow, constraints and change policy: `{constitution_path}`
- Feature specs live under `{specs_dir}/<feature>/`
  - `SPEC.md` (requirements)
  - `PLAN.md` (implementation plan)
  - `TASKS.md` (executable task list)
  - `ANALYSIS.md` (optional scratchpad)

## Multi-feature rule

- Never mix features in one `{specs_dir}/<feature>/` directory.
- If work spans features, update each feature's docs separately.
"
    )
}
