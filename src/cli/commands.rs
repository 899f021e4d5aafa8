use crate::app::Result;
use crate::domain::Message;
use crate::forum::{Forum, SearchQuery};

pub fn boards(forum: &Forum, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&forum.boards)?);
        return Ok(());
    }

    if forum.boards.is_empty() {
        println!("No boards found");
        return Ok(());
    }

    for board in &forum.boards {
        println!("{:>4}  {}", board.id, board.title);
    }
    Ok(())
}

pub async fn threads(forum: &Forum, board_id: &str, json: bool) -> Result<()> {
    let board = forum.board(board_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    if board.threads.is_empty() {
        println!("No threads in board {}", board_id);
        return Ok(());
    }

    println!("{} ({} threads)", board.title, board.threads.len());
    for thread in &board.threads {
        println!(
            "{:>7}  {}  {} ({})",
            thread.id, thread.date, thread.title, thread.author
        );
    }
    Ok(())
}

pub async fn thread(forum: &Forum, board_id: &str, thread_id: &str, json: bool) -> Result<()> {
    let thread = forum.thread(board_id, thread_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&thread)?);
        return Ok(());
    }

    if thread.messages.is_empty() {
        println!("No messages in thread {}", thread_id);
        return Ok(());
    }

    for message in &thread.messages {
        let read_marker = if message.read { " " } else { "●" };
        let indent = "  ".repeat(message.hierarchy.saturating_sub(1));
        println!(
            "{} {}{} ({}, {})",
            read_marker,
            indent,
            message.display_topic(),
            message.author.name,
            message.date
        );
    }
    Ok(())
}

pub async fn message(forum: &Forum, board_id: &str, message_id: &str, json: bool) -> Result<()> {
    let resource = format!("pxmboard.php?mode=message&brdid={board_id}&msgid={message_id}");
    let message = forum.message(&resource).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&message)?);
    } else {
        println!("{}", message.display_topic());
        println!("von {} am {}", message.author.name, message.date);
        println!();
        println!("{}", message.content);
    }

    forum.mark_read(&message.id)?;
    Ok(())
}

pub async fn search(forum: &Forum, query: &SearchQuery, json: bool) -> Result<()> {
    let messages = forum.search(query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!("No matches");
        return Ok(());
    }

    for message in &messages {
        print_search_hit(message);
    }
    Ok(())
}

fn print_search_hit(message: &Message) {
    println!(
        "[{}/{}/{}] {}  {} ({})",
        message.board_id,
        message.thread_id,
        message.id,
        message.date,
        message.display_topic(),
        message.author.name
    );
}
