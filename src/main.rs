mod config;
mod quiz;

use std::sync::Arc;

use chatgpt::{client::ChatGPT, config::ChatGPTEngine};
use config::Config;
use dotenv::dotenv;
use quiz::{
    card,
    content::ResultContent,
    pool::QuestionPool,
    roast::{RoastWriter, FALLBACK_ROAST},
    session::{Progress, QuizSession},
    Gender, QuizResult,
};
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{ChatAction, KeyboardButton, KeyboardMarkup, ParseMode},
    utils::html,
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    /// Gender is remembered across restarts once chosen.
    Landing {
        gender: Option<Gender>,
    },
    AwaitingGender,
    InQuestion {
        session: QuizSession,
    },
    Complete {
        result: QuizResult,
    },
}

type DialogueStorage = std::sync::Arc<ErasedStorage<State>>;

/// Read-only data shared by every chat.
struct App {
    pool: QuestionPool,
    content: ResultContent,
    roast_writer: RoastWriter,
    questions_per_quiz: usize,
    share_url: String,
}

#[tokio::main]
async fn main() -> HandlerResult {
    dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting red flag bot...");

    let config = Config::from_env()?;

    let bot = Bot::from_env();

    log::info!("Opening dialogue storage at {}", config.dialogue_db);
    let storage: DialogueStorage = SqliteStorage::open(&config.dialogue_db, Json)
        .await?
        .erase();

    let pool = match &config.questions_file {
        Some(path) => QuestionPool::load(path)?,
        None => QuestionPool::bundled()?,
    };
    log::info!("Loaded {} questions", pool.len());

    let content = match &config.results_file {
        Some(path) => ResultContent::load(path)?,
        None => ResultContent::bundled()?,
    };

    let gpt = {
        let mut gpt = ChatGPT::new(config.chatgpt_api_key.clone())?;

        gpt.config.engine = ChatGPTEngine::Gpt35Turbo;
        gpt.config.timeout = config.chatgpt_timeout;
        gpt.config.max_tokens = Some(config.chatgpt_max_tokens);

        gpt
    };

    let app = Arc::new(App {
        pool,
        content,
        roast_writer: RoastWriter::new(gpt),
        questions_per_quiz: config.questions_per_quiz,
        share_url: config.share_url.clone(),
    });

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::Landing { gender }].endpoint(landing))
            .branch(dptree::case![State::AwaitingGender].endpoint(receive_gender))
            .branch(dptree::case![State::InQuestion { session }].endpoint(in_question))
            .branch(dptree::case![State::Complete { result }].endpoint(complete)),
    )
    .dependencies(dptree::deps![storage, app])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    Ok(())
}

const START_BUTTON: &str = "Start the Roast 🔥";
const MALE_BUTTON: &str = "👨 Male";
const FEMALE_BUTTON: &str = "👩 Female";
const ROAST_BUTTON: &str = "Roast me 🔥";
const SHARE_BUTTON: &str = "Share 📤";
const RESTART_BUTTON: &str = "Take it again 🔁";

fn landing_text(questions: usize) -> String {
    format!(
        "🚩 <b>Red Flag Scorecard</b>\n\n\
         Think you're relationship material? Let's find out how many red flags you're serving 💅\n\n\
         {} questions • AI-powered roasts • Shareable results",
        questions
    )
}

async fn send_landing(bot: &Bot, chat_id: ChatId, app: &App) -> HandlerResult {
    bot.send_message(chat_id, landing_text(app.questions_per_quiz))
        .parse_mode(ParseMode::Html)
        .reply_markup(KeyboardMarkup::new(vec![vec![KeyboardButton::new(
            START_BUTTON,
        )]]))
        .await?;
    Ok(())
}

async fn start(bot: Bot, dialogue: QuizDialogue, app: Arc<App>, msg: Message) -> HandlerResult {
    send_landing(&bot, msg.chat.id, &app).await?;

    dialogue.update(State::Landing { gender: None }).await?;
    Ok(())
}

async fn landing(
    bot: Bot,
    dialogue: QuizDialogue,
    gender: Option<Gender>,
    app: Arc<App>,
    msg: Message,
) -> HandlerResult {
    if msg.text() != Some(START_BUTTON) {
        send_landing(&bot, msg.chat.id, &app).await?;
        return Ok(());
    }

    match gender {
        Some(gender) => begin_quiz(&bot, &dialogue, &app, msg.chat.id, gender).await,
        None => {
            let keyboard = KeyboardMarkup::new(vec![vec![
                KeyboardButton::new(MALE_BUTTON),
                KeyboardButton::new(FEMALE_BUTTON),
            ]]);
            bot.send_message(
                msg.chat.id,
                "Before we roast you... help us personalize your savage experience 💅",
            )
            .reply_markup(keyboard)
            .await?;

            dialogue.update(State::AwaitingGender).await?;
            Ok(())
        }
    }
}

async fn receive_gender(
    bot: Bot,
    dialogue: QuizDialogue,
    app: Arc<App>,
    msg: Message,
) -> HandlerResult {
    match msg.text().and_then(Gender::parse) {
        Some(gender) => {
            log::debug!("Chat {} picked {}", msg.chat.id.0, gender);
            begin_quiz(&bot, &dialogue, &app, msg.chat.id, gender).await
        }
        None => {
            bot.send_message(msg.chat.id, "Please pick one of the options")
                .await?;
            Ok(())
        }
    }
}

async fn begin_quiz(
    bot: &Bot,
    dialogue: &QuizDialogue,
    app: &App,
    chat_id: ChatId,
    gender: Gender,
) -> HandlerResult {
    let session = QuizSession::start(
        &app.pool,
        app.questions_per_quiz,
        gender,
        &mut rand::thread_rng(),
    );
    log::info!("Chat {} started a quiz", chat_id.0);

    send_question(bot, chat_id, &session).await?;

    dialogue.update(State::InQuestion { session }).await?;
    Ok(())
}

async fn send_question(bot: &Bot, chat_id: ChatId, session: &QuizSession) -> HandlerResult {
    let Some(question) = session.current() else {
        return Ok(());
    };
    let (number, total) = session.progress();

    let question_text = format!(
        "Question {} of {}\n\n<b>{}</b>",
        number,
        total,
        html::escape(question.text_for(session.gender))
    );

    let options = question
        .options
        .iter()
        .map(|o| vec![KeyboardButton::new(o.option.text_for(session.gender))])
        .collect::<Vec<_>>();

    bot.send_message(chat_id, question_text)
        .parse_mode(ParseMode::Html)
        .reply_markup(KeyboardMarkup::new(options))
        .await?;
    Ok(())
}

fn result_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(ROAST_BUTTON),
            KeyboardButton::new(SHARE_BUTTON),
        ],
        vec![KeyboardButton::new(RESTART_BUTTON)],
    ])
}

async fn in_question(
    bot: Bot,
    dialogue: QuizDialogue,
    session: QuizSession,
    app: Arc<App>,
    msg: Message,
) -> HandlerResult {
    let mut session = session;

    let position = match (session.current(), msg.text()) {
        (Some(question), Some(text)) => question.position_of_text(text, session.gender),
        _ => None,
    };
    let Some(position) = position else {
        bot.send_message(msg.chat.id, "Please pick one of the options")
            .await?;
        return Ok(());
    };

    match session.answer(position)? {
        Progress::Next => {
            send_question(&bot, msg.chat.id, &session).await?;
            dialogue.update(State::InQuestion { session }).await?;
        }
        Progress::Complete => {
            let result = session.finish(&app.pool, &app.content, &mut rand::thread_rng());
            log::info!(
                "Chat {} answered {} questions, {}/{}/{} flags",
                msg.chat.id.0,
                session.answers().len(),
                result.red_flags,
                result.yellow_flags,
                result.green_flags
            );

            bot.send_message(msg.chat.id, card::render_card(&result))
                .parse_mode(ParseMode::Html)
                .reply_markup(result_keyboard())
                .await?;
            dialogue.update(State::Complete { result }).await?;
        }
    }
    Ok(())
}

async fn complete(
    bot: Bot,
    dialogue: QuizDialogue,
    result: QuizResult,
    app: Arc<App>,
    msg: Message,
) -> HandlerResult {
    let mut result = result;

    match msg.text() {
        Some(ROAST_BUTTON) => {
            if result.roast.is_none() {
                if let Err(err) = bot.send_chat_action(msg.chat.id, ChatAction::Typing).await {
                    log::debug!("Typing indicator failed: {}", err);
                }

                let roast = match app.roast_writer.write_roast(&result).await {
                    Ok(roast) if !roast.is_empty() => roast,
                    Ok(_) => FALLBACK_ROAST.to_string(),
                    Err(err) => {
                        log::warn!("Error generating roast: {}", err);
                        FALLBACK_ROAST.to_string()
                    }
                };
                result.attach_roast(roast);
            }

            bot.send_message(msg.chat.id, card::render_card(&result))
                .parse_mode(ParseMode::Html)
                .reply_markup(result_keyboard())
                .await?;
            dialogue.update(State::Complete { result }).await?;
        }
        Some(SHARE_BUTTON) => {
            bot.send_message(msg.chat.id, card::share_text(&result, &app.share_url))
                .reply_markup(result_keyboard())
                .await?;
        }
        Some(RESTART_BUTTON) => {
            send_landing(&bot, msg.chat.id, &app).await?;
            dialogue
                .update(State::Landing {
                    gender: Some(result.gender),
                })
                .await?;
        }
        _ => {
            bot.send_message(msg.chat.id, "Please pick one of the options")
                .reply_markup(result_keyboard())
                .await?;
        }
    }
    Ok(())
}
