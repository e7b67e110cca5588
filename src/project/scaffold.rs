//! Starter files written by `iridium init`.

pub const GAME_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no">
    <link rel="icon" href="data:;base64,iVBORw0KGgo=">

    <title>Iridium Game</title>

    <style>
      p.io-log {
          font-style: italic;
          color: tomato;
      }

      p {
          text-align: justify;
      }

      .io-active-choice {
          color: blue;
          text-decoration: none;
          cursor: pointer;
      }

      .io-active-choice:hover {
          text-decoration: underline;
      }

      .io-selected-choice {
          font-style: italic;
      }

      h1.io-splash, h2.io-splash, h3.io-splash {
          font-family: "Roboto Slab", sans-serif;
          display: flex;
          justify-content: center;
      }

      h1.io-splash {
          font-size: 24px;
          text-transform: uppercase;
      }

      h2.io-splash {
          font-size: 24px;
      }

      h3.io-splash {
          font-size: 18px;
          padding-bottom: 20px;
      }

      body {
          font-size: 20px;
          line-height: 1.3;
          font-family: "Georgia", "Libre Baskerville", serif;
          margin: 50px;
      }
    </style>
  </head>

  <body>

    <div style="max-width: 900px; margin-left: auto; margin-right: auto;">
      <div id="play"></div>
    </div>

  </body>

</html>
"#;

pub const GAME_JSON: &str = r#"{
    "title": "Title",
    "subtitle": "Subtitle",
    "author": "Author",
    "init": "start",
    "config": {
        "clear": true,
        "debug": true
    }
}
"#;

pub const START_PASSAGE: &str = r#"The game starts here.

#(option "next-screen")
  Go to the next screen
#(end)
"#;

pub const NEXT_PASSAGE: &str = r#"This is the next screen. The story ends here.
"#;
