//! Bundled configuration payloads the setup writes to disk
//!
//! Everything the installer materializes under `$HOME` lives here as a
//! constant, so an install never depends on fetching config files from
//! a hot URL.

/// Where vim-plug is fetched from
pub const VIM_PLUG_URL: &str =
    "https://raw.githubusercontent.com/junegunn/vim-plug/master/plug.vim";

/// Upstream oh-my-zsh repository, shallow-cloned during shell setup
pub const OMZ_REPO_URL: &str = "https://github.com/ohmyzsh/ohmyzsh.git";

/// Theme name the generated zshrc selects
pub const ZSH_THEME_NAME: &str = "forge";

/// Custom oh-my-zsh theme installed under custom/themes/
pub const ZSH_THEME: &str = r#"# termforge prompt

if [[ "$USER" == "root" ]]; then
  PROMPT="%(?:%{$fg_bold[red]%}#:%{$fg_bold[red]%}!)"
else
  PROMPT="%(?:%{$fg_bold[green]%}>:%{$fg_bold[red]%}!)"
fi
PROMPT+=' %{$fg[cyan]%}%c%{$reset_color%} $(git_prompt_info)'

ZSH_THEME_GIT_PROMPT_PREFIX="%{$fg_bold[blue]%}git:(%{$fg[red]%}"
ZSH_THEME_GIT_PROMPT_SUFFIX="%{$reset_color%} "
ZSH_THEME_GIT_PROMPT_DIRTY="%{$fg[blue]%}) %{$fg[yellow]%}✗"
ZSH_THEME_GIT_PROMPT_CLEAN="%{$fg[blue]%})"
"#;

/// Alias block appended to the generated zshrc
pub const ZSHRC_ALIASES: &str = r#"
#------------------------------------------
alias l='ls -lh'
alias ll='ls -lah'
alias la='ls -a'
alias ld='ls -lhd'
alias p='pwd'
alias u='cd $PREFIX'
alias h='cd $HOME'
alias :q='exit'
alias grep='grep --color=auto'
alias open='termux-open'
alias xx='chmod +x'
alias rel='termux-reload-settings'
#------------------------------------------

# SSH Server Connections

# linux (Arch)
#alias arch='ssh UNAME@IP -i ~/.ssh/id_rsa.DEVICE'

# linux sftp (Arch)
#alias archfs='sftp -i ~/.ssh/id_rsa.DEVICE UNAME@IP'
"#;

/// Terminal palette written to ~/.termux/colors.properties
pub const TERMUX_COLORS: &str = r#"background      : #263238
foreground      : #eceff1
color0          : #263238
color8          : #37474f
color1          : #ff9800
color9          : #ffa74d
color2          : #8bc34a
color10         : #9ccc65
color3          : #ffc107
color11         : #ffa000
color4          : #03a9f4
color12         : #81d4fa
color5          : #e91e63
color13         : #f06292
color6          : #009688
color14         : #4db6ac
color7          : #eceff1
color15         : #ffffff
"#;

/// Neovim config with vim-plug and a small plugin set
pub const INIT_VIM: &str = r#"call plug#begin('~/.local/share/nvim/plugged')

Plug 'tpope/vim-sensible'
Plug 'junegunn/fzf', { 'do': { -> fzf#install() } }
Plug 'junegunn/fzf.vim'
Plug 'neoclide/coc.nvim', {'branch': 'release'}

call plug#end()

syntax on
set number
filetype plugin indent on
"#;

/// X resources matching the terminal palette
pub const XRESOURCES: &str = r#"! termforge Xresources

*.background: #263238
*.foreground: #eceff1
*.cursorColor: #eceff1

*.color0: #263238
*.color8: #37474f
*.color1: #ff9800
*.color9: #ffa74d
*.color2: #8bc34a
*.color10: #9ccc65
*.color3: #ffc107
*.color11: #ffa000
*.color4: #03a9f4
*.color12: #81d4fa
*.color5: #e91e63
*.color13: #f06292
*.color6: #009688
*.color14: #4db6ac
*.color7: #eceff1
*.color15: #ffffff

Xft.antialias: true
Xft.hinting: true
Xft.rgba: rgb
Xft.hintstyle: hintslight
"#;

/// Polybar bar definition for the Openbox session
pub const POLYBAR_CONFIG: &str = r#"[colors]
background = #263238
foreground = #eceff1
primary = #03a9f4
alert = #ff9800

[bar/main]
width = 100%
height = 28
background = ${colors.background}
foreground = ${colors.foreground}
padding-left = 1
padding-right = 1
module-margin = 1
font-0 = "DejaVu Sans Mono:size=10;2"
modules-left = workspaces
modules-center = date
modules-right = memory cpu battery
wm-restack = generic

[module/workspaces]
type = internal/xworkspaces
label-active-foreground = ${colors.primary}

[module/date]
type = internal/date
interval = 5
date = %a %d %b
time = %H:%M
label = %date% %time%

[module/memory]
type = internal/memory
interval = 2
label = mem %percentage_used%%

[module/cpu]
type = internal/cpu
interval = 2
label = cpu %percentage%%

[module/battery]
type = internal/battery
battery = BAT0
adapter = AC
label-charging = chr %percentage%%
label-discharging = bat %percentage%%
"#;

/// Launch script installed next to the polybar config
pub const POLYBAR_LAUNCH: &str = r#"killall -q polybar
while pgrep -u $(id -u) -x polybar >/dev/null; do sleep 0.5; done
polybar main &
"#;

/// Openbox autostart hook
pub const OPENBOX_AUTOSTART: &str = r#"# Wallpaper
feh --bg-fill ~/.config/wallpapers/default.png &

# Compositor
xcompmgr &

# Panel
~/.config/polybar/launch.sh &
"#;

/// Minimal Openbox rc with the keybindings the session relies on
pub const OPENBOX_RC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<openbox_config xmlns="http://openbox.org/3.4/rc">
  <theme>
    <name>Clearlooks</name>
    <titleLayout>NLIMC</titleLayout>
  </theme>
  <desktops>
    <number>4</number>
  </desktops>
  <keyboard>
    <keybind key="W-Return">
      <action name="Execute">
        <command>xfce4-terminal</command>
      </action>
    </keybind>
    <keybind key="W-d">
      <action name="Execute">
        <command>rofi -show drun</command>
      </action>
    </keybind>
    <keybind key="W-q">
      <action name="Close"/>
    </keybind>
  </keyboard>
</openbox_config>
"#;
