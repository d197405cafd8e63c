use super::{prompt, prompt_i64};
use crate::error::Result;
use crate::exam_session::ExamSession;
use crate::grade::letter_grade;
use crate::models::exam::StudentExam;
use crate::models::user::SessionUser;
use crate::utils::time::format_clock;
use crate::AppState;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::interval;

pub async fn menu(state: &AppState, user: &SessionUser) -> Result<()> {
    loop {
        let exams = match state.student_service.exams(user.user_id).await {
            Ok(exams) => exams,
            Err(e) => {
                println!("{e}");
                Vec::new()
            }
        };
        render_exams(&exams);

        println!("[t]ake exam  [r]esult  [0] log out");
        match prompt("Select")?.as_str() {
            "t" => {
                let Some(exam_id) = prompt_i64("Exam id")? else {
                    continue;
                };
                let Some(exam) = exams.iter().find(|e| e.exam_id == exam_id) else {
                    println!("No such exam on your dashboard.");
                    continue;
                };
                if !exam.can_start() {
                    println!("This exam cannot be started (not active, or already attempted).");
                    continue;
                }
                if let Err(e) = take_exam(state, exam).await {
                    println!("{e}");
                }
            }
            "r" => {
                let Some(exam_id) = prompt_i64("Exam id")? else {
                    continue;
                };
                if let Err(e) = show_result(state, user, exam_id).await {
                    println!("{e}");
                }
            }
            "0" => {
                state.session.clear()?;
                println!("Logged out.");
                return Ok(());
            }
            _ => println!("Unknown option."),
        }
    }
}

fn render_exams(exams: &[StudentExam]) {
    let completed = exams
        .iter()
        .filter(|e| e.status.as_str() == "completed")
        .count();
    println!(
        "\nStudent dashboard — {} exams, {} completed",
        exams.len(),
        completed
    );
    println!(
        "{:>4}  {:<28} {:<18} {:<10} {:>5} {:>9} {:>6}",
        "Id", "Title", "Module", "Status", "Min", "Score", "Grade"
    );
    for exam in exams {
        let score = exam
            .score
            .map(|s| format!("{s}/{}", exam.total_mark))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>4}  {:<28} {:<18} {:<10} {:>5} {:>9} {:>6}",
            exam.exam_id,
            exam.title,
            exam.module_name,
            exam.status,
            exam.duration,
            score,
            letter_grade(exam.percentage, exam.status.as_str())
        );
    }
}

/// The timed exam flow. Session check, question load, then an interactive
/// loop multiplexing stdin commands with the one-second countdown tick.
/// Hitting zero submits automatically, exactly once.
async fn take_exam(state: &AppState, exam: &StudentExam) -> Result<()> {
    let Some(user) = state.session.current_user() else {
        println!("User not logged in. Please log in to take the exam.");
        return Ok(());
    };

    println!("Loading questions...");
    let questions = state.student_service.questions(exam.exam_id).await?;
    if questions.is_empty() {
        println!("No questions found for this exam.");
        return Ok(());
    }

    // Header detail only; a failure here is not worth blocking the exam.
    let module_name = state
        .student_service
        .module_name(exam.exam_id)
        .await
        .unwrap_or_else(|_| exam.module_name.clone());

    let mut session = ExamSession::new(user.user_id, exam.exam_id, exam.duration, questions);
    let mut ticker = interval(Duration::from_secs(1));
    ticker.tick().await; // the first tick completes immediately

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    render_question(&session, &module_name);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if session.tick() {
                    println!("\nTime is up — submitting your answers.");
                    return finish(state, &session).await;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    println!("Input closed; leaving the exam without submitting.");
                    return Ok(());
                };
                match line.trim() {
                    "a" => {
                        if let Some(id) = session.current_question().map(|q| q.question_id) {
                            let answer = read_answer(&mut lines).await?;
                            session.record_answer(id, answer);
                            render_question(&session, &module_name);
                        }
                    }
                    "n" => {
                        session.next();
                        render_question(&session, &module_name);
                    }
                    "p" => {
                        session.previous();
                        render_question(&session, &module_name);
                    }
                    "f" => {
                        if let Some(id) = session.current_question().map(|q| q.question_id) {
                            session.toggle_flag(id);
                            render_question(&session, &module_name);
                        }
                    }
                    "s" => {
                        return finish(state, &session).await;
                    }
                    "q" => {
                        println!("Leaving without submitting. Your answers are discarded.");
                        return Ok(());
                    }
                    "" => render_question(&session, &module_name),
                    _ => println!(
                        "Commands: [a]nswer  [n]ext  [p]revious  [f]lag  [s]ubmit  [q]uit"
                    ),
                }
            }
        }
    }
}

async fn read_answer(lines: &mut Lines<BufReader<Stdin>>) -> Result<String> {
    println!("Enter your answer:");
    Ok(lines.next_line().await?.unwrap_or_default())
}

fn render_question(session: &ExamSession, module_name: &str) {
    let Some(question) = session.current_question() else {
        return;
    };
    let flag = if session.is_flagged(question.question_id) {
        "  [flagged]"
    } else {
        ""
    };
    println!(
        "\nModule: {}  |  Time remaining: {}",
        module_name,
        format_clock(session.remaining_secs())
    );
    println!(
        "Question {} of {} ({} mark{}){}",
        session.current_index() + 1,
        session.total_questions(),
        question.mark,
        if question.mark == 1 { "" } else { "s" },
        flag
    );
    println!("  {}", question.text);
    let answer = session.answer_for(question.question_id);
    if answer.is_empty() {
        println!("  (no answer yet)");
    } else {
        println!("  Your answer: {answer}");
    }
    println!("[a]nswer  [n]ext  [p]revious  [f]lag  [s]ubmit  [q]uit");
}

/// Submission endpoint of the flow, shared by manual submit and timer
/// expiry. Failure leaves any already-applied answers in place server-side;
/// the flow does not resume.
async fn finish(state: &AppState, session: &ExamSession) -> Result<()> {
    println!(
        "Submitting {} answers ({} filled in)...",
        session.total_questions(),
        session.answered_count()
    );
    match session.submit_all(&state.student_service).await {
        Ok(()) => {
            println!("Exam submitted. Returning to dashboard.");
            Ok(())
        }
        Err(e) => {
            println!("Failed to submit exam. Please try again. ({e})");
            Ok(())
        }
    }
}

async fn show_result(state: &AppState, user: &SessionUser, exam_id: i64) -> Result<()> {
    let Some(result) = state.student_service.result(user.user_id, exam_id).await? else {
        println!("No result found for this exam.");
        return Ok(());
    };

    println!("\n{} — {}", result.title, result.module_name);
    println!(
        "Score {}/{} ({:.1}%)  Grade {}",
        result.score,
        result.total_mark,
        result.percentage,
        letter_grade(result.percentage, "completed")
    );
    for q in &result.questions {
        println!("\n  [{}/{}] {}", q.score, q.mark, q.text);
        if q.student_answer.is_empty() {
            println!("    Your answer: (blank)");
        } else {
            println!("    Your answer: {}", q.student_answer);
        }
        if let Some(model) = &q.model_answer {
            println!("    Model answer: {model}");
        }
        if let Some(feedback) = &q.feedback {
            println!("    Feedback: {feedback}");
        }
    }
    Ok(())
}
