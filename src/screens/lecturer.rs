use super::{prompt, prompt_i64, prompt_u32};
use crate::draft::{edit_draft_key, local_question_id, DraftQuestion, ExamDraft, CREATE_DRAFT_KEY};
use crate::dto::auth_dto::Credentials;
use crate::error::Result;
use crate::grade::letter_grade;
use crate::models::exam::ExamStatus;
use crate::models::module::Module;
use crate::models::user::SessionUser;
use crate::AppState;

pub async fn menu(state: &AppState, user: &SessionUser) -> Result<()> {
    loop {
        match state.lecturer_service.dashboard().await {
            Ok(dashboard) => {
                println!(
                    "\nLecturer dashboard — {} exams, {} students",
                    dashboard.exams.len(),
                    dashboard.total_students
                );
                for exam in &dashboard.exams {
                    println!(
                        "  {:>4}  {:<32} {:<10} {} min",
                        exam.exam_id, exam.title, exam.status, exam.duration
                    );
                }
            }
            Err(e) => println!("{e}"),
        }

        println!("[c]reate  [e]dit  [q]uestions  [r]esults  [d]elete exam  [0] log out");
        let choice = prompt("Select")?;
        let outcome = match choice.as_str() {
            "c" => create_exam(state).await,
            "e" => edit_exam(state).await,
            "q" => view_questions(state).await,
            "r" => results(state).await,
            "d" => delete_exam(state, user).await,
            "0" => {
                state.session.clear()?;
                println!("Logged out.");
                return Ok(());
            }
            _ => {
                println!("Unknown option.");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            println!("{e}");
        }
    }
}

/// Authoring loop shared by create and edit. Every change rewrites the
/// draft file under `key` so a crash or accidental exit loses nothing;
/// the file is cleared only after the backend accepted everything.
async fn author_loop(
    state: &AppState,
    key: &str,
    mut draft: ExamDraft,
    modules: &[Module],
    mut on_remove_persisted: impl FnMut(i64) -> bool,
) -> Result<Option<ExamDraft>> {
    loop {
        render_draft(&draft, modules);
        println!(
            "[t]itle  [i]description  [u]duration  [m]odule  [s]tatus  [a]dd question  \
             [x] remove question  [p]ublish/save  [b]ack"
        );
        match prompt("Action")?.as_str() {
            "t" => {
                draft.title = prompt("Title")?;
            }
            "i" => {
                draft.description = prompt("Description")?;
            }
            "u" => {
                if let Some(minutes) = prompt_u32("Duration (minutes)")? {
                    draft.duration = Some(minutes);
                }
            }
            "m" => {
                for module in modules {
                    println!("  {:>4}  {}", module.id, module.name);
                }
                if let Some(id) = prompt_i64("Module id")? {
                    draft.module_id = Some(id);
                }
            }
            "s" => match prompt("Status (active/upcoming/draft)")?.parse::<ExamStatus>() {
                Ok(status) => draft.status = Some(status),
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            },
            "a" => {
                let question = prompt("Question text")?;
                if question.is_empty() {
                    println!("Question text is required.");
                    continue;
                }
                let Some(points) = prompt_u32("Marks")? else {
                    continue;
                };
                let model_answer = prompt("Model answer (optional)")?;
                draft.questions.push(DraftQuestion {
                    id: local_question_id(),
                    question,
                    model_answer,
                    points,
                });
            }
            "x" => {
                let Some(id) = prompt_i64("Question id")? else {
                    continue;
                };
                let before = draft.questions.len();
                draft.questions.retain(|q| q.id != id);
                if draft.questions.len() == before {
                    println!("No question with that id in the draft.");
                    continue;
                }
                if on_remove_persisted(id) {
                    if let Err(e) = state.lecturer_service.delete_question(id).await {
                        println!("{e}");
                    }
                }
            }
            "p" => return Ok(Some(draft)),
            "b" => return Ok(None),
            _ => {
                println!("Unknown option.");
                continue;
            }
        }
        state.drafts.save(key, &draft)?;
    }
}

fn render_draft(draft: &ExamDraft, modules: &[Module]) {
    let module_name = draft
        .module_id
        .and_then(|id| modules.iter().find(|m| m.id == id))
        .map(|m| m.name.as_str())
        .unwrap_or("(none)");
    println!(
        "\nTitle: {}\nDescription: {}\nDuration: {}\nModule: {}\nStatus: {}",
        if draft.title.is_empty() {
            "(none)"
        } else {
            &draft.title
        },
        if draft.description.is_empty() {
            "(none)"
        } else {
            &draft.description
        },
        draft
            .duration
            .map(|d| format!("{d} min"))
            .unwrap_or_else(|| "(none)".to_string()),
        module_name,
        draft
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "(none)".to_string()),
    );
    println!("Questions ({}):", draft.questions.len());
    for q in &draft.questions {
        println!("  {:>15}  [{} marks] {}", q.id, q.points, q.question);
    }
}

async fn create_exam(state: &AppState) -> Result<()> {
    let modules = state.lecturer_service.modules().await?;
    let draft = state.drafts.load(CREATE_DRAFT_KEY).unwrap_or_default();
    if !draft.is_empty() {
        println!("Resuming saved draft \"{}\".", draft.title);
    }

    let Some(draft) = author_loop(state, CREATE_DRAFT_KEY, draft, &modules, |_| false).await?
    else {
        return Ok(());
    };

    let payload = draft.to_exam_payload()?;
    let exam_id = state.lecturer_service.create_exam(&payload).await?;
    state
        .lecturer_service
        .add_questions(exam_id, &draft.question_payloads(payload.module_id))
        .await?;
    state.drafts.clear(CREATE_DRAFT_KEY)?;
    println!("Exam {exam_id} published.");
    Ok(())
}

async fn edit_exam(state: &AppState) -> Result<()> {
    let Some(exam_id) = prompt_i64("Exam id")? else {
        return Ok(());
    };
    let exam = state.lecturer_service.exam(exam_id).await?;
    let questions = state.lecturer_service.questions(exam_id).await?;
    let modules = state.lecturer_service.modules().await.unwrap_or_default();
    let persisted_ids: Vec<i64> = questions.iter().map(|q| q.question_id).collect();

    let key = edit_draft_key(exam_id);
    let draft = match state.drafts.load(&key) {
        Some(saved) => {
            println!("Resuming unsaved changes for \"{}\".", exam.title);
            saved
        }
        None => ExamDraft {
            title: exam.title.clone(),
            description: exam.description.clone(),
            duration: Some(exam.duration),
            module_id: exam.module_id,
            status: Some(exam.status),
            questions: questions
                .iter()
                .map(|q| DraftQuestion {
                    id: q.question_id,
                    question: q.text.clone(),
                    model_answer: q.model_answer.clone().unwrap_or_default(),
                    points: q.mark,
                })
                .collect(),
        },
    };

    let Some(draft) = author_loop(state, &key, draft, &modules, move |id| {
        persisted_ids.contains(&id)
    })
    .await?
    else {
        return Ok(());
    };

    let update = draft.to_exam_update()?;
    state.lecturer_service.update_exam(exam_id, &update).await?;
    let module_id = draft.module_id.unwrap_or_default();
    state
        .lecturer_service
        .replace_questions(exam_id, &draft.question_payloads(module_id))
        .await?;
    state.drafts.clear(&key)?;
    println!("Exam {exam_id} saved.");
    Ok(())
}

async fn view_questions(state: &AppState) -> Result<()> {
    let Some(exam_id) = prompt_i64("Exam id")? else {
        return Ok(());
    };
    let questions = state.lecturer_service.questions(exam_id).await?;
    if questions.is_empty() {
        println!("No questions found for this exam.");
        return Ok(());
    }
    for q in &questions {
        println!("\nQuestion #{} [{} marks]", q.question_id, q.mark);
        println!("  {}", q.text);
        if let Some(answer) = &q.model_answer {
            println!("  Model answer: {answer}");
        }
    }
    Ok(())
}

async fn results(state: &AppState) -> Result<()> {
    let Some(exam_id) = prompt_i64("Exam id")? else {
        return Ok(());
    };
    let list = state.lecturer_service.results(exam_id).await?;
    if list.results.is_empty() {
        println!("No results yet.");
        return Ok(());
    }
    println!(
        "\n{:<24} {:<12} {:>8} {:>8} {:>6}",
        "Student", "Status", "Score", "Percent", "Grade"
    );
    for row in &list.results {
        println!(
            "{:<24} {:<12} {:>8} {:>7.1}% {:>6}",
            row.student_name,
            row.status,
            row.total_score,
            row.percentage,
            letter_grade(row.percentage, &row.status)
        );
    }
    Ok(())
}

/// Exam deletion re-prompts for lecturer credentials, mirroring admin user
/// deletion; the backend re-authorizes before dropping anything.
async fn delete_exam(state: &AppState, user: &SessionUser) -> Result<()> {
    let Some(exam_id) = prompt_i64("Exam id to delete")? else {
        return Ok(());
    };
    let username = prompt(&format!("Confirm lecturer username [{}]", user.username))?;
    let username = if username.is_empty() {
        user.username.clone()
    } else {
        username
    };
    let password = prompt("Enter password")?;
    state
        .lecturer_service
        .delete_exam(exam_id, &Credentials { username, password })
        .await?;
    println!("Exam deleted.");
    Ok(())
}
