use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;

/// 生成并检查的最大轮数
pub const MAX_RESTAURANT_CODE_ATTEMPTS: u32 = 100;

pub const RESTAURANT_CODE_DIGITS: usize = 4;
pub const RESTAURANT_CODE_LETTERS: usize = 3;

/// 分配餐厅码时使用的存在性检查
#[async_trait]
pub trait RestaurantCodeLookup: Send + Sync {
    async fn restaurant_code_exists(&self, code: &str) -> AppResult<bool>;
}

/// 生成7位餐厅码：4位数字 + 3位大写字母，随机打乱顺序
pub fn generate_restaurant_code() -> String {
    let mut rng = rand::thread_rng();
    generate_restaurant_code_with(&mut rng)
}

pub fn generate_restaurant_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut chars: Vec<char> = Vec::with_capacity(RESTAURANT_CODE_DIGITS + RESTAURANT_CODE_LETTERS);
    for _ in 0..RESTAURANT_CODE_DIGITS {
        chars.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }
    for _ in 0..RESTAURANT_CODE_LETTERS {
        chars.push(char::from(b'A' + rng.gen_range(0..26u8)));
    }
    // SliceRandom::shuffle is a Fisher-Yates shuffle
    chars.shuffle(rng);
    chars.into_iter().collect()
}

/// 生成餐厅码直到 `lookup` 报告未被占用
///
/// 每轮只做一次存在性检查，超过 [`MAX_RESTAURANT_CODE_ATTEMPTS`] 轮返回
/// [`AppError::CodeSpaceExhausted`]。并发注册时检查与插入之间存在竞争，
/// 最终由 `restaurants.restaurant_code` 的唯一索引保证不重复
pub async fn generate_unique_restaurant_code<L>(lookup: &L) -> AppResult<String>
where
    L: RestaurantCodeLookup + ?Sized,
{
    for attempt in 1..=MAX_RESTAURANT_CODE_ATTEMPTS {
        let code = generate_restaurant_code();
        if !lookup.restaurant_code_exists(&code).await? {
            if attempt > 1 {
                log::debug!("Restaurant code allocated after {attempt} attempts");
            }
            return Ok(code);
        }
    }

    log::error!(
        "Restaurant code space exhausted after {} attempts",
        MAX_RESTAURANT_CODE_ATTEMPTS
    );
    Err(AppError::CodeSpaceExhausted {
        attempts: MAX_RESTAURANT_CODE_ATTEMPTS,
    })
}

/// 生成6位数字邮箱验证码（100000-999999，不会出现前导零）
pub fn generate_email_verification_code() -> String {
    let mut rng = rand::thread_rng();
    rng.gen_range(100000..=999999u32).to_string()
}
