//! Operator-facing texts and prompt rendering.

use workact_catalog::WorkCatalog;
use workact_dialogue::{Prompt, FINISH_OPTION, MANUAL_DATE_OPTION, TODAY_OPTION};
use workact_infra::CompletedOrderRecord;

use crate::transport::{InlineOption, Reply};

pub const ACCESS_DENIED: &str = "⛔️ Доступ заборонено. Зверніться до адміністратора.";
pub const ACCESS_DENIED_SHORT: &str = "⛔️ Доступ заборонено.";
pub const GREETING: &str = "Вітаю! Давайте створимо акт виконаних робіт.\n\nЯк звати замовника?";
pub const ASK_ADDRESS: &str = "Вкажіть адресу виконання робіт:";
pub const ASK_DATE: &str = "Вкажіть дату виконання робіт:";
pub const ENTER_DATE: &str = "Введіть дату виконання робіт (ДД.ММ.РРРР):";
pub const FIRST_MENU: &str = "Оберіть види робіт (по одному):";
pub const NEXT_MENU: &str = "Оберіть наступний вид роботи або завершіть:";
pub const FINISH_LABEL: &str = "✅ Завершити";
pub const INVALID_QUANTITY: &str = "Введіть кількість цифрою.";
pub const QUANTITY_TOO_LARGE: &str = "Занадто велика кількість. Введіть менше число.";
pub const CANCELLED: &str = "Скасовано.";
pub const DOCUMENT_CAPTION: &str = "Ось ваш акт у PDF:";
pub const PRICING_FAILED: &str = "Не вдалося розрахувати акт. Почніть спочатку: /start";

pub const HISTORY_ABSENT: &str = "Історія поки що порожня.";
pub const HISTORY_EMPTY: &str = "Записів не знайдено.";
pub const HISTORY_HEADER: &str = "📜 Історія актів:";
pub const HISTORY_UNAVAILABLE: &str = "Не вдалося прочитати історію.";
pub const DOCUMENT_NOT_FOUND: &str = "PDF файл не знайдено. Можливо, його було видалено.";

pub const THINKING: &str = "🤖 Думаю...";
pub const ASK_USAGE: &str = "Напишіть питання після команди. Приклад: /ask_gpt Як вибрати автомат?";

/// Callback prefix for re-delivering a historical document.
pub const HISTORY_CALLBACK_PREFIX: &str = "get_";

pub fn ask_quantity(work: &str) -> String {
    format!("Скільки одиниць роботи: '{work}'?")
}

pub fn unknown_work(work: &str) -> String {
    format!("Невідомий вид роботи: '{work}'. Оберіть зі списку.")
}

pub fn ai_error(error: &impl std::fmt::Display) -> String {
    format!("Помилка AI: {error}")
}

/// Catalog entries in catalog order, then the finish option.
fn work_menu(text: &str, catalog: &WorkCatalog) -> Reply {
    let mut options: Vec<InlineOption> = catalog
        .entries()
        .iter()
        .map(|entry| InlineOption::new(entry.work_type.as_str(), entry.work_type.as_str()))
        .collect();
    options.push(InlineOption::new(FINISH_LABEL, FINISH_OPTION));
    Reply::Options {
        text: text.to_string(),
        options,
    }
}

pub fn prompt_reply(prompt: &Prompt, catalog: &WorkCatalog) -> Reply {
    match prompt {
        Prompt::AskName => Reply::text(GREETING),
        Prompt::AskAddress => Reply::text(ASK_ADDRESS),
        Prompt::AskDate => Reply::Keyboard {
            text: ASK_DATE.to_string(),
            options: vec![TODAY_OPTION.to_string(), MANUAL_DATE_OPTION.to_string()],
        },
        Prompt::EnterDate => Reply::RemoveKeyboard(ENTER_DATE.to_string()),
        Prompt::WorkMenu { first: true } => work_menu(FIRST_MENU, catalog),
        Prompt::WorkMenu { first: false } => work_menu(NEXT_MENU, catalog),
        Prompt::AskQuantity(work) => Reply::text(ask_quantity(work.as_str())),
        Prompt::InvalidQuantity => Reply::text(INVALID_QUANTITY),
        Prompt::QuantityTooLarge => Reply::text(QUANTITY_TOO_LARGE),
        Prompt::UnknownWork(work) => Reply::text(unknown_work(work)),
        Prompt::Cancelled => Reply::RemoveKeyboard(CANCELLED.to_string()),
    }
}

/// Numbered listing of recent records with one retrieval option each.
pub fn history_listing(records: &[CompletedOrderRecord]) -> Reply {
    let mut text = HISTORY_HEADER.to_string();
    let mut options = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let n = i + 1;
        text.push_str(&format!(
            "\n{n}. {} — {} — {} грн",
            record.date, record.name, record.grand_total
        ));
        options.push(InlineOption::new(
            format!("Отримати PDF #{n}"),
            format!("{HISTORY_CALLBACK_PREFIX}{i}"),
        ));
    }
    Reply::Options { text, options }
}
